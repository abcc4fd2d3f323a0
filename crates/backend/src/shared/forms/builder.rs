use contracts::shared::forms::{
    ChoiceOption, FieldDefinition, FormMode, RenderAttributes, Validator, Widget,
};
use contracts::shared::metadata::{FieldKind, FieldMetadata, ModelMetadata};

const TEXTAREA_ROWS: u32 = 4;

/// Form definition of one field
pub fn build_field(field: &FieldMetadata) -> FieldDefinition {
    let label = field.display_label().into_owned();
    let rules = field.validation;

    let widget = match field.kind {
        FieldKind::Text => Widget::TextInput,
        FieldKind::LongText => Widget::TextArea,
        FieldKind::SingleChoice => Widget::Select,
        FieldKind::Integer | FieldKind::Decimal => Widget::Number,
        FieldKind::Date => Widget::DatePicker,
        FieldKind::DateTime => Widget::DateTimePicker,
        FieldKind::Boolean => Widget::Checkbox,
        FieldKind::Reference => Widget::ReferenceSelect,
    };

    let mut validators = vec![if rules.required {
        Validator::Required
    } else {
        Validator::Optional
    }];
    if let Some(max) = rules.max_length {
        validators.push(Validator::Length { max });
    }
    if rules.has_range() {
        validators.push(Validator::NumberRange {
            min: rules.min,
            max: rules.max,
        });
    }

    let mut choices = Vec::new();
    if field.kind.is_choice() {
        let declared: Vec<ChoiceOption> = field
            .ordered_choices()
            .into_iter()
            .map(|c| ChoiceOption {
                value: c.value.to_string(),
                label: c.display_label().to_string(),
                description: c.description.map(str::to_string),
            })
            .collect();
        validators.push(Validator::Choice {
            allowed: declared.iter().map(|c| c.value.clone()).collect(),
        });
        if !rules.required {
            choices.push(ChoiceOption {
                value: String::new(),
                label: format!("Select {}", label),
                description: None,
            });
        }
        choices.extend(declared);
    }

    let placeholder = match field.ui.placeholder {
        Some(placeholder) => placeholder.to_string(),
        None if field.kind.is_choice() => format!("Select {}", label),
        None => format!("Enter {}...", label.to_lowercase()),
    };

    let mut attrs = RenderAttributes {
        max_length: rules.max_length,
        unit: field.ui.unit.map(str::to_string),
        ..Default::default()
    };
    match field.kind {
        FieldKind::Integer | FieldKind::Decimal => {
            attrs.min = rules.min;
            attrs.max = rules.max;
            attrs.step = Some(if field.kind == FieldKind::Integer { "1" } else { "any" }.to_string());
        }
        FieldKind::LongText => attrs.rows = Some(TEXTAREA_ROWS),
        _ => {}
    }

    FieldDefinition {
        name: field.name.to_string(),
        label,
        kind: field.kind,
        widget,
        required: rules.required,
        validators,
        choices,
        placeholder,
        attrs,
        help: field.ui.help.map(str::to_string),
        ref_entity: field.ref_entity.map(str::to_string),
    }
}

/// Ordered form definition of an entity type
///
/// Identifier and timestamp fields are never included. Whether fields opt in
/// (whitelist) or opt out (blacklist) is decided once for the whole entity
/// type; partial forms also drop modal-excluded fields.
pub fn build_form_schema(meta: &ModelMetadata, mode: FormMode) -> Vec<FieldDefinition> {
    meta.form_fields()
        .into_iter()
        .filter(|f| mode == FormMode::Full || !f.ui.modal_exclude)
        .map(build_field)
        .collect()
}
