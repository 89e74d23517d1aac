use crate::Command;
use crate::tests::completion_dsl::{fixture, t};

const LINE: usize = 84;

fn selector(fragment_with_cursor: &str) -> String {
    format!("        entitySelectorTemplate: {fragment_with_cursor}")
}

#[test]
fn type_argument_offers_entity_types() {
    fixture(LINE, &selector("type($0)"))
        .expect_contains_labels(&["demo:app", "demo:endpoint", "dt.entity.host"])
        .expect_item_insert_text("demo:app", "demo:app")
        .expect_applied_line("demo:app", &selector("type(demo:app)"));
}

#[test]
fn type_argument_closes_call() {
    fixture(LINE, &selector("type(demo:e$0"))
        .expect_labels(&["demo:endpoint"])
        .expect_replaced("demo:e")
        .expect_applied_line("demo:endpoint", &selector("type(demo:endpoint)"));
}

#[test]
fn operators_at_selector_start() {
    fixture(LINE, &selector("$0"))
        .expect_top_labels(&["type(", "entityId(", "entityName("])
        .expect_contains_labels(&["not(", "$(entityConditions)"]);
}

#[test]
fn used_single_operators_are_not_offered_again() {
    fixture(LINE, &selector("type(demo:app),$0"))
        .expect_not_contains_labels(&["type("])
        .expect_contains_labels(&["tag(", "fromRelationships."])
        .expect_item_command("fromRelationships.", Some(Command::TriggerSuggest))
        .expect_item_command("tag(", None);
}

#[test]
fn nested_selector_has_its_own_scope() {
    fixture(LINE, &selector("type(demo:app),toRelationships.isPartOf(ty$0"))
        .expect_top_labels(&["type("]);
}

#[test]
fn closed_nested_selector_does_not_use_up_operators() {
    fixture(LINE, &selector("toRelationships.isPartOf(type(demo:endpoint)),$0"))
        .expect_contains_labels(&["type(", "healthState("]);
}

#[test]
fn relationships_follow_selected_type() {
    fixture(LINE, &selector("type(demo:endpoint),fromRelationships.$0"))
        .expect_labels(&["isPartOf"])
        .expect_item_insert_text("isPartOf", "isPartOf(")
        .expect_item_detail("isPartOf", "demo:endpoint to demo:app")
        .expect_item_command("isPartOf", Some(Command::TriggerSuggest));
    fixture(LINE, &selector("type(demo:app),toRelationships.$0")).expect_labels(&["isPartOf"]);
    fixture(LINE, &selector("type(demo:endpoint),toRelationships.$0")).expect_empty();
}

#[test]
fn nested_relationships_follow_nested_type() {
    fixture(
        LINE,
        &selector("type(demo:app),toRelationships.isPartOf(type(demo:endpoint),fromRelationships.$0"),
    )
    .expect_labels(&["isPartOf"]);
}

#[test]
fn health_states() {
    fixture(LINE, &selector("type(demo:app),healthState($0"))
        .expect_labels(&["HEALTHY", "UNHEALTHY"])
        .expect_item_insert_text("HEALTHY", "HEALTHY)");
}

#[test]
fn free_text_arguments_get_nothing() {
    fixture(LINE, &selector("type(demo:app),entityName($0")).expect_empty();
}

#[test]
fn entity_conditions_only_inside_list_cards() {
    t("dashboards:\n  - entitySelector: $0\n")
        .expect_contains_labels(&["type("])
        .expect_not_contains_labels(&["$(entityConditions)"]);
}

#[test]
fn retrigger_can_be_disabled() {
    fixture(LINE, &selector("type(demo:app),$0"))
        .retrigger(false)
        .expect_item_command("fromRelationships.", None);
}
