//! Template validation against the entity schema
//!
//! Every token of the template is checked, in order, and all problems are
//! reported together. A token counts as used as soon as it is seen, whether
//! or not it is valid, so a repeated invalid token reports its own problem
//! once and a duplicate-key error for each repeat.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::parser::{capitalize, lines_with_offsets, tokens_with_spans, FieldRef, RefSyntax, Span};
use crate::schema::{reference_field_for, EntityKind, Rules};

/// Validates layout templates
#[derive(Debug, Clone, Default)]
pub struct Validator {
    rules: Rules,
}

impl Validator {
    /// Create a validator with the default rules
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom rules
    pub fn with_rules(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Check a whole template; an empty list means the template is valid
    pub fn validate(&self, template: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        let mut used: HashSet<&str> = HashSet::new();

        for (offset, line) in lines_with_offsets(template) {
            for (token, span) in tokens_with_spans(line) {
                let span = offset + span.start..offset + span.end;
                if used.insert(token) {
                    self.check_token(token, span, &mut errors);
                } else {
                    errors.push(ValidationError::DuplicateKey {
                        token: token.to_string(),
                        span,
                    });
                }
            }
        }

        tracing::debug!(errors = errors.len(), "validated address format");
        errors
    }

    fn check_token(&self, token: &str, span: Span, errors: &mut Vec<ValidationError>) {
        match FieldRef::parse(token) {
            Err(RefSyntax::TooManyElements) => errors.push(ValidationError::TooManyElements {
                token: token.to_string(),
                span,
            }),
            Err(RefSyntax::EmptySegment) => errors.push(ValidationError::Syntax {
                token: token.to_string(),
                span,
            }),
            Ok(FieldRef::Simple(field)) => self.check_simple(field, span, errors),
            Ok(FieldRef::Related { class, field }) => self.check_related(class, field, span, errors),
        }
    }

    fn check_simple(&self, field: &str, span: Span, errors: &mut Vec<ValidationError>) {
        let field = field.to_lowercase();
        if self.rules.is_forbidden_property(&field) {
            errors.push(ValidationError::ForbiddenName { name: field, span });
        } else if !EntityKind::Address.has_template_field(&field, false) {
            errors.push(ValidationError::UnknownField {
                class: EntityKind::Address.to_string(),
                field,
                span,
            });
        }
    }

    fn check_related(&self, class: &str, field: &str, span: Span, errors: &mut Vec<ValidationError>) {
        let class = capitalize(class);
        let field = field.to_lowercase();

        if self.rules.is_forbidden_class(&class) {
            errors.push(ValidationError::ForbiddenName { name: class, span });
            return;
        }

        if class != EntityKind::Address.class_name() {
            let reference = reference_field_for(&class);
            if !EntityKind::Address.has_template_field(&reference, true) {
                errors.push(ValidationError::MissingReference {
                    class: class.clone(),
                    field: reference,
                    span: span.clone(),
                });
            }
        }

        match EntityKind::from_class_name(&class) {
            None => errors.push(ValidationError::UnknownClass { class, span }),
            Some(_) if self.rules.is_forbidden_property(&field) => {
                errors.push(ValidationError::ForbiddenName { name: field, span })
            }
            Some(kind) if !kind.has_template_field(&field, false) => {
                errors.push(ValidationError::UnknownField { class, field, span })
            }
            Some(_) => {}
        }
    }
}

/// Validate a template with the default rules
pub fn validate(template: &str) -> Vec<ValidationError> {
    Validator::new().validate(template)
}
