//! Template registry: compiles every feature template into literal and
//! profile-field segments once, at startup.
//!
//! A placeholder that does not name a Profile field is a startup error, so a
//! typo in a template never reaches a user request.

use thiserror::Error;

use crate::coaching::features::Feature;
use crate::models::profile::{Profile, ProfileField};

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("template '{feature}' references unknown placeholder '{{{placeholder}}}'")]
    UnknownPlaceholder {
        feature: Feature,
        placeholder: String,
    },

    #[error("template '{feature}' has an unterminated placeholder at byte {offset}")]
    Unterminated { feature: Feature, offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Segment {
    Literal(&'static str),
    Field(ProfileField),
}

/// A template split into literal text and the profile fields substituted between it.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    fn compile(feature: Feature, source: &'static str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(&rest[..open]));
            }
            let after_open = &rest[open + 1..];
            let close = after_open.find('}').ok_or(TemplateError::Unterminated {
                feature,
                offset: offset + open,
            })?;
            let name = &after_open[..close];
            let field = ProfileField::from_placeholder(name).ok_or_else(|| {
                TemplateError::UnknownPlaceholder {
                    feature,
                    placeholder: name.to_string(),
                }
            })?;
            segments.push(Segment::Field(field));

            let consumed = open + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }

        Ok(Self { segments })
    }

    /// Profile fields referenced by this template, in first-use order.
    pub fn fields(&self) -> Vec<ProfileField> {
        let mut fields = Vec::new();
        for segment in &self.segments {
            if let Segment::Field(field) = segment {
                if !fields.contains(field) {
                    fields.push(*field);
                }
            }
        }
        fields
    }

    /// Substitutes each placeholder with the profile's value for that field.
    pub fn render(&self, profile: &Profile) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&profile.field_value(*field)),
            }
        }
        out
    }
}

/// All six compiled templates, indexed in `Feature::ALL` order.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<CompiledTemplate>,
}

impl TemplateRegistry {
    /// Compiles every feature template. Fails on the first bad placeholder.
    pub fn load() -> Result<Self, TemplateError> {
        let templates = Feature::ALL
            .into_iter()
            .map(|feature| CompiledTemplate::compile(feature, feature.template()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { templates })
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    pub fn get(&self, feature: Feature) -> &CompiledTemplate {
        &self.templates[feature as usize]
    }

    pub fn render(&self, feature: Feature, profile: &Profile) -> String {
        self.get(feature).render(profile)
    }
}
