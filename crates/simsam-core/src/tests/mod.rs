mod layout;
mod mapping;

use crate::SimsamModel;
use serde_json::{Value, json};

/// The four-element model used across the forward/reverse tests.
pub(crate) fn scenario_model(layout: Value) -> SimsamModel {
    let elements = json!([
        { "id": "E1", "name": "Request", "type": "Resource" },
        { "id": "A1", "name": "Send mail", "type": "Action", "subType": "Mail Outgoing" },
        { "id": "D1", "name": "Approved?", "type": "Decision" },
        { "id": "S1", "name": "Done", "type": "State" }
    ]);
    let connections = json!([
        { "id": "E1->A1", "fromId": "E1", "toId": "A1" },
        { "id": "A1->D1", "fromId": "A1", "toId": "D1", "probability": 0.5 },
        { "id": "D1->S1", "fromId": "D1", "toId": "S1" }
    ]);
    SimsamModel::from_json(&elements, &connections, json!({}), layout).unwrap()
}
