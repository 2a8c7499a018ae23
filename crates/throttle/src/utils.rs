/// 操作対象のスタックを決定
///
/// デフォルトのスタックは無い。
pub fn determine_stack_name(stack: Option<String>) -> anyhow::Result<String> {
    if let Some(s) = stack {
        return Ok(s);
    }

    let available = throttle_config::find_project_root()
        .ok()
        .and_then(|root| throttle_config::available_stacks(&root).ok())
        .unwrap_or_default();

    let hint = if available.is_empty() {
        String::new()
    } else {
        format!("\nAvailable stacks: {}", available.join(", "))
    };

    Err(anyhow::anyhow!(
        "Specify a stack: throttle <command> <stack> or THROTTLE_STACK=<stack>{}",
        hint
    ))
}
