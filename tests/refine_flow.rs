// tests/refine_flow.rs
//
// Conversation-level behavior of the refinement rules via `refine()`.

use req2uml::model::{class_id, relationship_id, Class, Relationship};
use req2uml::refine::{resolve, Intent};
use req2uml::{extract_model, refine, ChatTurn, Model, RelationshipKind};

fn order_customer() -> Model {
    Model {
        classes: vec![
            Class::empty(class_id(0), "Order".into()),
            Class::empty(class_id(1), "Customer".into()),
        ],
        relationships: Vec::new(),
        description: "test".into(),
    }
}

fn linked(kind: RelationshipKind) -> Model {
    let mut m = order_customer();
    m.relationships.push(Relationship {
        id: relationship_id(0),
        from_class: "Customer".into(),
        to_class: "Order".into(),
        kind,
        label: Some("places".into()),
        multiplicity: None,
    });
    m
}

#[test]
fn add_class_then_already_exists() {
    let start = order_customer();

    let first = refine(&start, "add a Invoice class", &[]);
    assert_eq!(
        first.message,
        "Added new class \"Invoice\" to your model. You now have 3 classes."
    );
    let after = first.updated_model.expect("model with Invoice");
    assert_eq!(after.classes[2].name, "Invoice");
    assert_eq!(after.classes[2].id, "class-2");
    assert!(after.classes[2].attributes.is_empty());

    let second = refine(&after, "add a Invoice class", &[]);
    assert_eq!(
        second.message,
        "The class \"Invoice\" already exists in your model."
    );
    assert!(second.updated_model.is_none());
    assert_eq!(after.classes.len(), 3);
}

#[test]
fn belongs_to_adds_association() {
    let start = order_customer();
    let reply = refine(&start, "Order belongs to Customer", &[]);

    assert_eq!(
        reply.message,
        "Added association relationship: Order → Customer. Your model now has 1 relationships."
    );
    let m = reply.updated_model.expect("updated model");
    assert_eq!(m.relationships.len(), 1);
    let r = &m.relationships[0];
    assert_eq!(r.id, "rel-0");
    assert_eq!((r.from_class.as_str(), r.to_class.as_str()), ("Order", "Customer"));
    assert_eq!(r.kind, RelationshipKind::Association);
    assert!(r.label.is_none());
    assert!(m.validate().is_ok());
}

#[test]
fn keywords_pick_relationship_kind() {
    let cases = [
        ("Order depends on Customer, point it to customer", RelationshipKind::Dependency),
        ("Order is part of Customer, link to customer", RelationshipKind::Aggregation),
        ("Customer owns the order, add it to order", RelationshipKind::Composition),
        ("Order extends Customer, connect to customer", RelationshipKind::Inheritance),
    ];
    for (text, kind) in cases {
        let m = refine(&order_customer(), text, &[])
            .updated_model
            .unwrap_or_else(|| panic!("no edit for {text}"));
        assert_eq!(m.relationships[0].kind, kind, "{text}");
    }
}

#[test]
fn existing_link_is_reported_not_duplicated() {
    let start = linked(RelationshipKind::Association);
    let reply = refine(&start, "connect order to customer", &[]);
    assert_eq!(
        reply.message,
        "A relationship between Order and Customer already exists."
    );
    assert!(reply.updated_model.is_none());
}

#[test]
fn change_to_composition_forces_mention_order() {
    let start = linked(RelationshipKind::Association);
    let res = resolve(
        &start,
        "Please change the relationship between order and customer to composition",
        &[],
    );
    assert_eq!(res.intent, Intent::ChangeRelationship);
    assert_eq!(
        res.reply.message,
        "Updated the relationship between Order and Customer to composition. Order now owns Customer (strong ownership)."
    );

    let m = res.reply.updated_model.expect("updated");
    let r = &m.relationships[0];
    assert_eq!(r.kind, RelationshipKind::Composition);
    assert_eq!((r.from_class.as_str(), r.to_class.as_str()), ("Order", "Customer"));
    assert_eq!(r.id, "rel-0");
    assert_eq!(r.label.as_deref(), Some("places"));

    // caller's model untouched
    assert_eq!(start.relationships[0].kind, RelationshipKind::Association);
    assert_eq!(start.relationships[0].from_class, "Customer");
}

#[test]
fn change_to_inheritance_keeps_direction() {
    let start = linked(RelationshipKind::Association);
    let reply = refine(&start, "modify order and customer so one will inherit", &[]);
    let m = reply.updated_model.expect("updated");
    let r = &m.relationships[0];
    assert_eq!(r.kind, RelationshipKind::Inheritance);
    assert_eq!((r.from_class.as_str(), r.to_class.as_str()), ("Customer", "Order"));
    assert!(reply.message.ends_with("Order now extends Customer."));
}

#[test]
fn change_without_kind_falls_back_to_conversation() {
    let start = linked(RelationshipKind::Association);
    let res = resolve(&start, "update order and customer relationship", &[]);
    assert_eq!(res.intent, Intent::Conversation);
    assert!(res.reply.updated_model.is_none());
    assert_eq!(
        res.reply.message,
        "I can help you refine the relationships in your UML diagram. Currently, you have 1 relationships defined."
    );
    assert_eq!(res.reply.clarifications.map(|c| c.len()), Some(2));
}

#[test]
fn help_lists_capabilities() {
    let reply = refine(&order_customer(), "What can you do?", &[]);
    assert!(reply.message.starts_with("I'm here to help refine your UML model."));
    assert!(reply.clarifications.is_none());
}

#[test]
fn refine_on_extracted_model() {
    let start = extract_model("A Customer creates an Order.");
    let history = vec![ChatTurn {
        role: "assistant".into(),
        content: "Model extracted.".into(),
    }];
    let reply = refine(&start, "create a new Invoice class", &history);
    let m = reply.updated_model.expect("updated");
    assert_eq!(m.classes.len(), 3);
    assert_eq!(m.relationships, start.relationships);
    assert_eq!(m.description, start.description);
}
