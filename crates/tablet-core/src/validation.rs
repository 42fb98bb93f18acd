//! Field validation for operator input. Runs before an event is built; the
//! reducer never sees invalid forms.

use crate::types::IncidentForm;
use serde::Serialize;

pub const INCIDENT_NOTES_MIN_CHARS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError<F> {
    pub field: F,
    pub message: String,
}

pub type Validator<'a, T, F> = &'a dyn Fn(&T) -> Vec<FieldError<F>>;

/// Flags every field whose value is blank after trimming.
pub fn validate_required<F: Copy>(fields: &[(F, &str)]) -> Vec<FieldError<F>> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| FieldError {
            field: *field,
            message: "Required field".to_string(),
        })
        .collect()
}

pub fn validate_min_length<F>(field: F, value: &str, min: usize) -> Vec<FieldError<F>> {
    if value.trim().chars().count() < min {
        vec![FieldError {
            field,
            message: format!("Must be at least {} characters", min),
        }]
    } else {
        Vec::new()
    }
}

/// Runs all validators and hands the payload back only when none report errors.
pub fn with_validation<T, F>(
    payload: T,
    validators: &[Validator<'_, T, F>],
) -> Result<T, Vec<FieldError<F>>> {
    let errors: Vec<FieldError<F>> = validators.iter().flat_map(|v| v(&payload)).collect();
    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentField {
    Title,
    Category,
    Location,
    Suspect,
    Notes,
    Evidence,
}

impl IncidentForm {
    pub fn validate(self) -> Result<IncidentForm, Vec<FieldError<IncidentField>>> {
        let required = |form: &IncidentForm| {
            validate_required(&[
                (IncidentField::Title, form.title.as_str()),
                (IncidentField::Location, form.location.as_str()),
                (IncidentField::Notes, form.notes.as_str()),
            ])
        };
        let notes_length = |form: &IncidentForm| {
            validate_min_length(IncidentField::Notes, &form.notes, INCIDENT_NOTES_MIN_CHARS)
        };
        let validators: [Validator<'_, IncidentForm, IncidentField>; 2] = [&required, &notes_length];
        with_validation(self, &validators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_blank_form_errors() {
        let errors = fixtures::initial_incident().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();

        assert_eq!(
            fields,
            vec![
                IncidentField::Title,
                IncidentField::Location,
                IncidentField::Notes,
                IncidentField::Notes
            ]
        );
        assert_eq!(errors[0].message, "Required field");
        assert_eq!(errors[3].message, "Must be at least 12 characters");
    }

    #[test]
    fn test_whitespace_is_blank() {
        let errors = validate_required(&[("title", "   ")]);
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_short_notes() {
        let mut form = fixtures::initial_incident();
        form.title = "Shop robbery".into();
        form.location = "Harbor".into();
        form.notes = "  too short  ".into();

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, IncidentField::Notes);
    }

    #[test]
    fn test_valid_form_passes_through() {
        let mut form = fixtures::initial_incident();
        form.title = "Shop robbery".into();
        form.location = "Harbor".into();
        form.notes = "Two suspects, one armed".into();

        let validated = form.clone().validate().unwrap();
        assert_eq!(validated, form);
    }
}
