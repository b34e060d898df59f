use serde_json::Value;

#[derive(Debug, PartialEq)]
pub enum Action {
    LoadEditor { data_type: String, item: Value },
    Quit,
}
