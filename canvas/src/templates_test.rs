use std::collections::HashSet;

use super::*;
use crate::content::ElementKind;

#[test]
fn three_templates_by_id() {
    let ids: Vec<&str> = TEMPLATES.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec!["software-engineer", "marketing-manager", "data-scientist"]);
    assert_eq!(template("data-scientist").map(|t| t.name), Some("Data Scientist"));
    assert!(template("astronaut").is_none());
}

#[test]
fn instantiate_lays_out_four_sections() {
    let elements = template("software-engineer").unwrap().instantiate();
    let kinds: Vec<ElementKind> = elements.iter().map(Element::kind).collect();
    assert_eq!(kinds, vec![ElementKind::Text, ElementKind::Contact, ElementKind::Experience, ElementKind::Skill]);
    assert_eq!(elements[2].position, Point::new(20.0, 160.0));
    assert_eq!(elements[2].size, Size::new(300.0, 120.0));
}

#[test]
fn instantiate_yields_fresh_ids_each_time() {
    let t = template("marketing-manager").unwrap();
    let first: HashSet<ElementId> = t.instantiate().into_iter().map(|e| e.id).collect();
    let second: HashSet<ElementId> = t.instantiate().into_iter().map(|e| e.id).collect();
    assert_eq!(first.len(), 4);
    assert!(first.is_disjoint(&second));
}

#[test]
fn template_content_is_valid() {
    for t in &TEMPLATES {
        for element in t.instantiate() {
            assert_eq!(element.content.validate(), Ok(()), "{} {}", t.id, element.kind());
        }
    }
}
