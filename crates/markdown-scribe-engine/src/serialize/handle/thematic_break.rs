use crate::error::SerializeError;
use crate::serialize::State;

pub fn thematic_break(state: &State) -> Result<String, SerializeError> {
    let marker = state.settings.check_rule()?;
    let repetition = state.settings.check_rule_repetition()?;
    let separator = if state.settings.rule_spaces() { " " } else { "" };

    Ok(vec![marker.to_string(); repetition].join(separator))
}
