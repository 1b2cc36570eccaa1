use crate::serialize::{Info, SafeConfig, State};

pub fn text(value: &str, state: &State, info: &Info<'_>) -> String {
    state.safe(value, SafeConfig::new(info.before, info.after))
}
