use contracts::shared::dropdown::{DropdownConfig, DropdownOption, FilterDropdown, UiContext};
use contracts::shared::metadata::{Capability, FieldMetadata, ModelMetadata};
use contracts::shared::query::{NormalizedParams, SortDirection};

/// Field picker for one capability (group by, sort by, filter by)
///
/// `id` is always sortable. A current value that names no option is dropped.
pub fn build_dropdown(
    meta: &ModelMetadata,
    capability: Capability,
    current: Option<&str>,
) -> DropdownConfig {
    let mut fields: Vec<(String, String)> = meta
        .fields_with(capability)
        .into_iter()
        .map(|f| (f.name.to_string(), f.display_label().into_owned()))
        .collect();

    if capability == Capability::Sortable && !fields.iter().any(|(name, _)| name == "id") {
        let label = meta
            .field("id")
            .map(|f| f.display_label().into_owned())
            .unwrap_or_else(|| "ID".to_string());
        fields.insert(0, ("id".to_string(), label));
    }

    let current = current.map(str::trim).filter(|c| !c.is_empty());
    let options: Vec<DropdownOption> = fields
        .into_iter()
        .map(|(value, label)| DropdownOption {
            selected: current == Some(value.as_str()),
            value,
            label,
        })
        .collect();

    let current_value = options.iter().find(|o| o.selected).map(|o| o.value.clone());
    if current.is_some() && current_value.is_none() {
        tracing::debug!(
            "Current {} value {:?} is not an option of {}",
            capability.as_str(),
            current,
            meta.entity_name
        );
    }

    let placeholder = match capability {
        Capability::Groupable => "Group by...",
        Capability::Sortable => "Sort by...",
        Capability::Filterable => "Filter by...",
        Capability::Searchable => "Search in...",
    };

    DropdownConfig {
        options,
        current_value,
        placeholder: placeholder.to_string(),
    }
}

/// Value dropdown of a filterable choice field, led by an "All ..." option
pub fn build_filter_dropdown(field: &FieldMetadata, current_values: &[String]) -> Option<FilterDropdown> {
    if !field.filterable || !field.kind.is_choice() {
        return None;
    }

    let label = field.display_label().into_owned();
    let current_values: Vec<String> = current_values
        .iter()
        .filter(|v| field.choice(v).is_some())
        .cloned()
        .collect();

    let all_label = format!("All {}", label);
    let mut options = vec![DropdownOption {
        value: String::new(),
        label: all_label.clone(),
        selected: current_values.is_empty(),
    }];
    options.extend(field.ordered_choices().into_iter().map(|choice| DropdownOption {
        value: choice.value.to_string(),
        label: choice.display_label().to_string(),
        selected: current_values.iter().any(|v| v == choice.value),
    }));

    Some(FilterDropdown {
        field: field.name.to_string(),
        label,
        options,
        current_values,
        placeholder: all_label,
    })
}

/// Fixed ascending/descending dropdown
pub fn direction_dropdown(current: SortDirection) -> DropdownConfig {
    let options = [SortDirection::Asc, SortDirection::Desc]
        .into_iter()
        .map(|direction| DropdownOption {
            value: direction.as_str().to_string(),
            label: match direction {
                SortDirection::Asc => "Ascending",
                SortDirection::Desc => "Descending",
            }
            .to_string(),
            selected: direction == current,
        })
        .collect();

    DropdownConfig {
        options,
        current_value: Some(current.as_str().to_string()),
        placeholder: "Direction".to_string(),
    }
}

/// Every control of a list view for the given request parameters
pub fn build_ui_context(meta: &ModelMetadata, params: &NormalizedParams) -> UiContext {
    let filters = meta
        .filterable_fields()
        .into_iter()
        .filter_map(|field| {
            let current = params.filter(field.name).unwrap_or(&[]);
            build_filter_dropdown(field, current)
        })
        .collect();

    UiContext {
        group_by: build_dropdown(meta, Capability::Groupable, params.group_by.as_deref()),
        sort_by: build_dropdown(meta, Capability::Sortable, params.sort_by.as_deref()),
        sort_direction: direction_dropdown(params.sort_direction),
        filters,
        search: params.search.clone(),
        display: meta.display_config(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query::parse_parameters;
    use contracts::domain::a001_company::Company;
    use contracts::domain::a003_opportunity::Opportunity;
    use contracts::domain::a004_task::Task;
    use contracts::shared::metadata::{EntityRef, FieldKind};

    fn company() -> ModelMetadata {
        ModelMetadata::from_entity(EntityRef::of::<Company>())
    }

    #[test]
    fn test_group_by_options() {
        let dropdown = build_dropdown(&company(), Capability::Groupable, Some("industry"));
        assert_eq!(dropdown.values(), vec!["industry", "size", "annual_revenue"]);
        assert_eq!(dropdown.current_value.as_deref(), Some("industry"));
        assert_eq!(dropdown.options[1].label, "Company Size");
        assert!(dropdown.options[0].selected);
        assert_eq!(dropdown.placeholder, "Group by...");
    }

    #[test]
    fn test_unknown_current_value_degrades() {
        let dropdown = build_dropdown(&company(), Capability::Groupable, Some("bogus"));
        assert_eq!(dropdown.current_value, None);
        assert!(dropdown.options.iter().all(|o| !o.selected));
    }

    #[test]
    fn test_id_always_sortable() {
        static FIELDS: &[FieldMetadata] = &[
            FieldMetadata::new("id", FieldKind::Integer).identifier(),
            FieldMetadata::new("name", FieldKind::Text).sortable(),
        ];
        let meta = ModelMetadata::from_entity(EntityRef::new(
            &contracts::domain::a001_company::ENTITY_METADATA,
            FIELDS,
        ));
        let dropdown = build_dropdown(&meta, Capability::Sortable, None);
        assert_eq!(dropdown.values(), vec!["id", "name"]);

        let dropdown = build_dropdown(&company(), Capability::Sortable, Some("id"));
        assert_eq!(dropdown.values().iter().filter(|v| **v == "id").count(), 1);
        assert_eq!(dropdown.current_value.as_deref(), Some("id"));
    }

    #[test]
    fn test_filter_dropdown_leads_with_all() {
        let meta = ModelMetadata::from_entity(EntityRef::of::<Opportunity>());
        let stage = meta.field("stage").unwrap();
        let dropdown = build_filter_dropdown(stage, &["won".to_string(), "bogus".to_string()]).unwrap();
        assert_eq!(dropdown.options[0].value, "");
        assert_eq!(dropdown.options[0].label, "All Stage");
        assert!(!dropdown.options[0].selected);
        assert_eq!(dropdown.current_values, vec!["won"]);
        assert_eq!(dropdown.options.len(), 6);

        let none = build_filter_dropdown(stage, &[]).unwrap();
        assert!(none.options[0].selected);

        assert!(build_filter_dropdown(meta.field("company").unwrap(), &[]).is_none());
    }

    #[test]
    fn test_direction_dropdown() {
        let dropdown = direction_dropdown(SortDirection::Desc);
        assert_eq!(dropdown.values(), vec!["asc", "desc"]);
        assert_eq!(dropdown.current_value.as_deref(), Some("desc"));
        assert!(dropdown.options[1].selected);
    }

    #[test]
    fn test_ui_context() {
        let meta = ModelMetadata::from_entity(EntityRef::of::<Task>());
        let params = parse_parameters([("group_by", "status"), ("priority", "high"), ("q", "call")]);
        let context = build_ui_context(&meta, &params);

        assert_eq!(context.group_by.current_value.as_deref(), Some("status"));
        assert_eq!(context.sort_by.current_value, None);
        let fields: Vec<_> = context.filters.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["status", "priority"]);
        assert_eq!(context.filters[1].current_values, vec!["high"]);
        assert_eq!(context.search.as_deref(), Some("call"));
        assert_eq!(context.display.title_field, "title");
    }
}
