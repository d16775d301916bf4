//! Form-builder state tests: adding, editing, reordering, selecting and removing
//! components.
mod common;
use common::*;
use nodeform::prelude::*;
use serde_json::json;

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn test_add_component_uses_type_defaults() {
        let expected = [
            ("text", json!({"placeholder": "", "required": false})),
            ("select", json!({"options": ["Option 1", "Option 2", "Option 3"]})),
            ("slider", json!({"min": 0.0, "max": 100.0, "step": 1.0, "defaultValue": 50.0})),
            ("image", json!({"maxSize": 5242880, "acceptedTypes": ["image/jpeg", "image/png"]})),
            ("toggle", json!({"defaultChecked": false})),
            ("checkbox", json!({"checked": false})),
        ];

        for (type_name, props) in expected {
            let mut builder = FormBuilder::new();
            let id = builder.add_component(type_name).unwrap();
            let component = builder.get(id).unwrap();

            assert_eq!(component.label, format!("New {}", type_name));
            assert_eq!(component.kind().as_str(), type_name);
            assert_eq!(component.props().to_value().unwrap(), props, "{}", type_name);
            assert_eq!(component.node_id, None);
            assert_eq!(component.node_input, None);
            assert_eq!(builder.selected_id(), Some(id));
        }
    }

    #[test]
    fn test_unknown_type_is_rejected_without_state_change() {
        let mut builder = FormBuilder::new();
        let err = builder.add_component("radio").unwrap_err();
        assert_eq!(err, BuilderError::UnknownComponentType("radio".to_string()));
        assert!(builder.is_empty());
        assert_eq!(builder.selected_id(), None);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut builder = FormBuilder::new();
        let mut ids: Vec<_> = (0..50).map(|_| builder.add(ComponentKind::Toggle)).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_move_is_a_single_element_move() {
        let (mut builder, _) = create_abcd_builder();
        builder.reorder_components(0, 2).unwrap();
        assert_eq!(labels(&builder), ["B", "C", "A", "D"]);

        builder.reorder_components(3, 0).unwrap();
        assert_eq!(labels(&builder), ["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_out_of_range_leaves_list_alone() {
        let (mut builder, _) = create_abcd_builder();
        let err = builder.reorder_components(1, 4).unwrap_err();
        assert_eq!(err, BuilderError::IndexOutOfRange { index: 4, len: 4 });
        assert_eq!(labels(&builder), ["A", "B", "C", "D"]);

        let err = builder.reorder_components(4, 0).unwrap_err();
        assert_eq!(err, BuilderError::IndexOutOfRange { index: 4, len: 4 });
        assert_eq!(labels(&builder), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_drag_over_another_component() {
        let (mut builder, ids) = create_abcd_builder();
        builder.move_component(ids[3], ids[1]).unwrap();
        assert_eq!(labels(&builder), ["A", "D", "B", "C"]);

        // Dropping a component on itself is a no-op.
        builder.move_component(ids[0], ids[0]).unwrap();
        assert_eq!(labels(&builder), ["A", "D", "B", "C"]);
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let (mut builder, ids) = create_abcd_builder();
        builder.select_component(Some(ids[1]));

        let removed = builder.remove_component(ids[1]).unwrap();
        assert_eq!(removed.label, "B");
        assert_eq!(builder.selected_id(), None);
        assert_eq!(labels(&builder), ["A", "C", "D"]);
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let (mut builder, ids) = create_abcd_builder();
        builder.select_component(Some(ids[0]));
        builder.remove_component(ids[2]);
        assert_eq!(builder.selected_id(), Some(ids[0]));
        assert_eq!(builder.selected().map(|c| c.label.as_str()), Some("A"));
    }

    #[test]
    fn test_remove_missing_is_a_no_op() {
        let (mut builder, ids) = create_abcd_builder();
        builder.remove_component(ids[2]);
        let before = builder.components().to_vec();

        assert!(builder.remove_component(ids[2]).is_none());
        assert_eq!(builder.components(), before.as_slice());
    }

    #[test]
    fn test_select_missing_clears_selection() {
        let (mut builder, ids) = create_abcd_builder();
        builder.select_component(Some(ids[0]));
        builder.select_component(Some(ComponentId::new()));
        assert_eq!(builder.selected_id(), None);

        builder.select_component(Some(ids[2]));
        builder.select_component(None);
        assert_eq!(builder.selected_id(), None);
    }

    #[test]
    fn test_props_update_is_a_shallow_merge() {
        let mut builder = FormBuilder::new();
        let id = builder.add(ComponentKind::Text);

        let update = ComponentUpdate::new().prop("placeholder", "Enter a prompt");
        let component = builder.update_component(id, &update).unwrap();

        assert_eq!(
            component.props().to_value().unwrap(),
            json!({"placeholder": "Enter a prompt", "required": false})
        );
        assert_eq!(component.label, "New text");
    }

    #[test]
    fn test_update_keeps_id_and_kind() {
        let mut builder = FormBuilder::new();
        let id = builder.add(ComponentKind::Slider);
        let update = ComponentUpdate::new()
            .label("Steps")
            .node_id(Some("3".to_string()))
            .node_input(Some("steps".to_string()))
            .prop("max", 150);

        let component = builder.update_component(id, &update).unwrap();
        assert_eq!(component.id(), id);
        assert_eq!(component.kind(), ComponentKind::Slider);
        assert_eq!(component.binding(), Some(("3", "steps")));
    }

    #[test]
    fn test_update_missing_component_is_not_found() {
        let mut builder = FormBuilder::new();
        builder.add(ComponentKind::Text);
        let ghost = ComponentId::new();
        let err = builder
            .update_component(ghost, &ComponentUpdate::new().label("x"))
            .unwrap_err();
        assert_eq!(err, BuilderError::NotFound(ghost));
    }

    #[test]
    fn test_invalid_props_are_rejected_atomically() {
        let mut builder = FormBuilder::new();
        let id = builder.add(ComponentKind::Text);
        let before = builder.get(id).unwrap().clone();

        let update = ComponentUpdate::new().label("Prompt").prop("colour", "red");
        let err = builder.update_component(id, &update).unwrap_err();

        assert!(matches!(err, BuilderError::InvalidProps { .. }));
        assert_eq!(builder.get(id), Some(&before));
    }

    #[test]
    fn test_edit_property_parses_editor_input() {
        let mut builder = FormBuilder::new();
        let select = builder.add(ComponentKind::Select);
        let image = builder.add(ComponentKind::Image);

        builder.edit_property(select, "options", "Low\nHigh").unwrap();
        builder.edit_property(image, "maxSize", "2").unwrap();

        assert_eq!(
            builder.get(select).unwrap().props().to_value().unwrap(),
            json!({"options": ["Low", "High"]})
        );
        assert_eq!(
            builder.get(image).unwrap().props().to_value().unwrap()["maxSize"],
            json!(2 * 1024 * 1024)
        );
    }

    #[test]
    fn test_changing_node_clears_input() {
        let mut builder = FormBuilder::new();
        let id = builder.add(ComponentKind::Slider);
        builder.bind_node(id, Some("3".to_string())).unwrap();
        builder.bind_input(id, Some("seed".to_string())).unwrap();
        assert_eq!(builder.get(id).unwrap().binding(), Some(("3", "seed")));

        builder.bind_node(id, Some("5".to_string())).unwrap();
        let component = builder.get(id).unwrap();
        assert_eq!(component.node_id.as_deref(), Some("5"));
        assert_eq!(component.node_input, None);
    }

    #[test]
    fn test_registry_alias_resolves_to_existing_kind() {
        let registry = ComponentRegistry::new().with_alias("dropdown", "select");
        let mut builder = FormBuilder::with_registry(registry);
        let id = builder.add_component("dropdown").unwrap();
        assert_eq!(builder.get(id).unwrap().kind(), ComponentKind::Select);
    }

    #[test]
    fn test_components_serialize_in_wire_shape() {
        let mut builder = FormBuilder::new();
        let id = builder.add(ComponentKind::Checkbox);
        builder.bind_node(id, Some("7".to_string())).unwrap();

        let value = serde_json::to_value(builder.components()).unwrap();
        assert_eq!(
            value,
            json!([{
                "id": id.to_string(),
                "type": "checkbox",
                "label": "New checkbox",
                "nodeId": "7",
                "props": {"checked": false}
            }])
        );

        let restored: Vec<FormComponent> = serde_json::from_value(value).unwrap();
        assert_eq!(restored, builder.components());
    }

    #[test]
    fn test_reopened_form_with_duplicate_ids_keeps_ids_unique() {
        let shared = ComponentId::new();
        let saved: Vec<FormComponent> = serde_json::from_value(json!([
            {"id": shared, "type": "text", "label": "First", "props": {"placeholder": "", "required": false}},
            {"id": shared, "type": "toggle", "label": "Second", "props": {"defaultChecked": true}}
        ]))
        .unwrap();

        let mut builder = FormBuilder::from_components(saved);
        assert_eq!(labels(&builder), ["First", "Second"]);

        let second = builder.components()[1].id();
        assert_ne!(second, shared);
        assert_eq!(builder.get(shared).unwrap().label, "First");

        builder.move_component(second, shared).unwrap();
        assert_eq!(labels(&builder), ["Second", "First"]);

        builder.remove_component(shared).unwrap();
        assert_eq!(labels(&builder), ["Second"]);
        assert_eq!(builder.get(second).unwrap().kind(), ComponentKind::Toggle);
    }
}
