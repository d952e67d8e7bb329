//! Attraction suggestions for a destination

use tracing::warn;

use crate::backend::chat::{ChatBackend, ChatMessage};

pub const SYSTEM_PROMPT: &str = "你是一个旅游助手，只返回景点名称。";

/// Separator the model is asked to use between attractions
const LIST_SEPARATOR: char = '，';

pub fn suggestion_prompt(location: &str) -> String {
    format!(
        "请只返回{location}最值得推荐的3个著名旅游景点的名称，\
         不要用markdown语法，用中文逗号分隔，每个景点加编号和一句简短的介绍\
         （例如：1. 外滩，上海的地标性景点，欣赏黄浦江两岸的壮丽景色。\
         2. 豫园，江南古典园林的代表，体验传统建筑和园林艺术。\
         3. 东方明珠塔，上海的象征之一，俯瞰城市全景的绝佳地点。）\
         每个景点之间有回车换行隔开。"
    )
}

/// Trim every comma separated part and drop empty ones
pub fn tidy_suggestion(raw: &str) -> String {
    raw.trim()
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("，")
}

/// Ask the backend for suggestions. A failing backend yields a placeholder
/// text naming the failure rather than an error.
pub async fn suggest_attractions(backend: &dyn ChatBackend, location: &str) -> String {
    let messages = vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(suggestion_prompt(location)),
    ];

    match backend.complete(messages).await {
        Ok(answer) => tidy_suggestion(&answer),
        Err(e) => {
            warn!(backend = %backend.name(), location = %location, error = %e, "Attraction suggestion failed");
            format!("{location}推荐景点：景点A，景点B，景点C（AI调用失败：{e}）")
        }
    }
}
