use crate::mapping::*;

#[test]
fn type_table_maps_each_simsam_type() {
    let m = TagMapping::default();
    assert_eq!(m.resolve(Some("Resource"), None), BpmnTag::StartEvent);
    assert_eq!(m.resolve(Some("Action"), None), BpmnTag::Task);
    assert_eq!(m.resolve(Some("Decision"), None), BpmnTag::ExclusiveGateway);
    assert_eq!(m.resolve(Some("State"), None), BpmnTag::EndEvent);
}

#[test]
fn known_subtype_wins_over_type() {
    let m = TagMapping::default();
    assert_eq!(m.resolve(Some("Action"), Some("Mail Outgoing")), BpmnTag::SendTask);
    assert_eq!(m.resolve(Some("Resource"), Some("Videocall")), BpmnTag::UserTask);
    assert_eq!(m.resolve(None, Some("Call Outgoing")), BpmnTag::ServiceTask);
    assert_eq!(m.resolve(Some("Action"), Some("Form Incoming")), BpmnTag::ReceiveTask);
}

#[test]
fn unknown_type_or_subtype_falls_back() {
    let m = TagMapping::default();
    assert_eq!(m.resolve(Some("Decision"), Some("Unheard Of")), BpmnTag::ExclusiveGateway);
    assert_eq!(m.resolve(Some("Bogus"), None), BpmnTag::Task);
    assert_eq!(m.resolve(None, None), BpmnTag::Task);
}

#[test]
fn registered_subtypes_extend_the_table() {
    let m = TagMapping::default().with_subtype("Fax Outgoing", BpmnTag::SendTask);
    assert_eq!(m.resolve(Some("Action"), Some("Fax Outgoing")), BpmnTag::SendTask);
}

#[test]
fn inverse_table_collapses_task_variants() {
    let m = TagMapping::default();
    assert_eq!(m.simsam_type(BpmnTag::StartEvent), "Resource");
    assert_eq!(m.simsam_type(BpmnTag::EndEvent), "State");
    assert_eq!(m.simsam_type(BpmnTag::ExclusiveGateway), "Decision");
    for tag in [
        BpmnTag::Task,
        BpmnTag::UserTask,
        BpmnTag::ServiceTask,
        BpmnTag::SendTask,
        BpmnTag::ReceiveTask,
    ] {
        assert_eq!(m.simsam_type(tag), "Action");
    }
}

#[test]
fn tags_have_names_and_sizes() {
    for tag in BpmnTag::ALL {
        assert_eq!(BpmnTag::from_name(tag.as_str()), Some(tag));
    }
    assert_eq!(BpmnTag::from_name("parallelGateway"), None);
    assert_eq!(BpmnTag::StartEvent.size(), (36.0, 36.0));
    assert_eq!(BpmnTag::ExclusiveGateway.size(), (50.0, 50.0));
    assert_eq!(BpmnTag::ReceiveTask.size(), (100.0, 80.0));
}

#[test]
fn schemas_end_with_carriage_return_keys() {
    assert_eq!(ELEMENT_SCHEMA.len(), 22);
    assert_eq!(ELEMENT_SCHEMA.last(), Some(&"frequency\r"));
    assert_eq!(CONNECTION_SCHEMA.len(), 10);
    assert_eq!(CONNECTION_SCHEMA.last(), Some(&"description\r"));
}
