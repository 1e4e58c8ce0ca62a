//! Contact form view models.
//!
//! The server renders both forms from the same [`FieldSpec`] tables it
//! validates with. Each input carries its checks as `data-rules` JSON, which
//! `static/js/contact-form.js` evaluates in the browser before submitting.

use cadoutsource_core::{
    DetailedProjectSubmission, FieldSpec, QuickServiceSubmission, SubmissionSchema,
};

/// A select option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn same(label: &'static str) -> SelectOption {
    SelectOption {
        value: label,
        label,
    }
}

/// Project types offered on the quote form.
pub const PROJECT_TYPES: &[SelectOption] = &[
    same("As-Built Drawings"),
    same("2D Drafting"),
    same("3D Rendering"),
    same("CAD Conversion"),
    same("HVAC Drawings"),
    same("Solar PV"),
    same("Commissioning"),
    same("Legionella Schematic"),
    same("Facilities Mapping"),
    same("Other"),
];

/// Budget ranges offered on the quote form.
pub const BUDGETS: &[SelectOption] = &[
    same("Under £1,000"),
    same("£1,000 - £5,000"),
    same("£5,000 - £10,000"),
    same("£10,000 - £25,000"),
    same("£25,000+"),
    same("Discuss in consultation"),
];

/// Timelines offered on the quote form.
pub const TIMELINES: &[SelectOption] = &[
    same("Rush (1-3 days)"),
    same("Standard (1-2 weeks)"),
    same("Extended (2-4 weeks)"),
    same("Ongoing project"),
    same("Flexible"),
];

/// Services offered on the quick message form and listed on the home page.
pub const SERVICES: &[SelectOption] = &[
    SelectOption {
        value: "legionella",
        label: "Legionella Schematic Drawing",
    },
    SelectOption {
        value: "solar",
        label: "Solar PV Layouts & Wiring",
    },
    SelectOption {
        value: "commissioning",
        label: "Commissioning & Pre-Commissioning",
    },
    SelectOption {
        value: "as-built",
        label: "As-Built Drawings",
    },
    SelectOption {
        value: "hvac",
        label: "HVAC Drawing",
    },
    SelectOption {
        value: "gis",
        label: "Facilities Mapping & GIS",
    },
    SelectOption {
        value: "3d-rendering",
        label: "3D Rendering & Modeling",
    },
    SelectOption {
        value: "cad-conversion",
        label: "CAD Conversion",
    },
    SelectOption {
        value: "2d-drafting",
        label: "2D Drafting & Designing",
    },
];

/// HTML control used for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Text,
    Email,
    Tel,
    Select(&'static [SelectOption]),
    TextArea,
}

/// How a field is presented. Validation comes from the schema.
#[derive(Debug, Clone, Copy)]
struct Layout {
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    control: Control,
}

const QUOTE_LAYOUT: &[Layout] = &[
    Layout {
        name: "name",
        label: "Full Name",
        placeholder: "John Smith",
        control: Control::Text,
    },
    Layout {
        name: "email",
        label: "Email Address",
        placeholder: "john@company.com",
        control: Control::Email,
    },
    Layout {
        name: "phone",
        label: "Phone Number",
        placeholder: "+44 20 1234 5678",
        control: Control::Tel,
    },
    Layout {
        name: "company",
        label: "Company Name",
        placeholder: "Your Company Ltd",
        control: Control::Text,
    },
    Layout {
        name: "projectType",
        label: "Project Type",
        placeholder: "Select project type",
        control: Control::Select(PROJECT_TYPES),
    },
    Layout {
        name: "budget",
        label: "Budget Range",
        placeholder: "Select budget range",
        control: Control::Select(BUDGETS),
    },
    Layout {
        name: "timeline",
        label: "Timeline",
        placeholder: "Select timeline",
        control: Control::Select(TIMELINES),
    },
    Layout {
        name: "message",
        label: "Project Details",
        placeholder: "Tell us about your project requirements...",
        control: Control::TextArea,
    },
];

const MESSAGE_LAYOUT: &[Layout] = &[
    Layout {
        name: "fullName",
        label: "Full Name",
        placeholder: "Enter your full name",
        control: Control::Text,
    },
    Layout {
        name: "email",
        label: "Email Address",
        placeholder: "Enter your email",
        control: Control::Email,
    },
    Layout {
        name: "phone",
        label: "Phone Number",
        placeholder: "Enter your phone number",
        control: Control::Tel,
    },
    Layout {
        name: "service",
        label: "Service Required",
        placeholder: "Select a service",
        control: Control::Select(SERVICES),
    },
    Layout {
        name: "message",
        label: "Message",
        placeholder: "Tell us about your project (optional)",
        control: Control::TextArea,
    },
];

/// One rendered form field.
#[derive(Debug, Clone)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub control: Control,
    pub required: bool,
    /// JSON array of the field's checks.
    pub rules: String,
}

impl FieldView {
    fn new(layout: &Layout, spec: Option<&FieldSpec>) -> Self {
        Self {
            name: layout.name,
            label: layout.label,
            placeholder: layout.placeholder,
            control: layout.control,
            required: spec.is_some_and(|spec| spec.required),
            rules: spec.map_or_else(|| "[]".to_string(), FieldSpec::rules_json),
        }
    }

    /// HTML `type` attribute for `<input>` controls.
    #[must_use]
    pub const fn input_type(&self) -> &'static str {
        match self.control {
            Control::Email => "email",
            Control::Tel => "tel",
            Control::Text | Control::Select(_) | Control::TextArea => "text",
        }
    }

    #[must_use]
    pub const fn is_select(&self) -> bool {
        matches!(self.control, Control::Select(_))
    }

    #[must_use]
    pub const fn is_textarea(&self) -> bool {
        matches!(self.control, Control::TextArea)
    }

    /// Options for select controls; empty otherwise.
    #[must_use]
    pub const fn options(&self) -> &'static [SelectOption] {
        match self.control {
            Control::Select(options) => options,
            _ => &[],
        }
    }
}

/// A complete contact form.
#[derive(Debug, Clone)]
pub struct FormView {
    pub id: &'static str,
    pub endpoint: &'static str,
    pub submit_label: &'static str,
    pub thank_you_token: String,
    pub fields: Vec<FieldView>,
}

fn fields<S: SubmissionSchema>(layout: &[Layout]) -> Vec<FieldView> {
    layout
        .iter()
        .map(|field| FieldView::new(field, S::field(field.name)))
        .collect()
}

/// The detailed project quote form.
#[must_use]
pub fn quote_form(thank_you_token: &str) -> FormView {
    FormView {
        id: "quote-form",
        endpoint: "/api/contact/contact",
        submit_label: "Get My Free Quote",
        thank_you_token: thank_you_token.to_string(),
        fields: fields::<DetailedProjectSubmission>(QUOTE_LAYOUT),
    }
}

/// The quick service message form.
#[must_use]
pub fn message_form(thank_you_token: &str) -> FormView {
    FormView {
        id: "message-form",
        endpoint: "/api/sendMessage/sendMessage",
        submit_label: "Send Message",
        thank_you_token: thank_you_token.to_string(),
        fields: fields::<QuickServiceSubmission>(MESSAGE_LAYOUT),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn names(layout: &[Layout]) -> Vec<&'static str> {
        layout.iter().map(|field| field.name).collect()
    }

    fn spec_names<S: SubmissionSchema>() -> Vec<&'static str> {
        S::FIELDS.iter().map(|field| field.name).collect()
    }

    #[test]
    fn test_layouts_cover_every_schema_field() {
        assert_eq!(names(QUOTE_LAYOUT), spec_names::<DetailedProjectSubmission>());
        assert_eq!(names(MESSAGE_LAYOUT), spec_names::<QuickServiceSubmission>());
    }

    #[test]
    fn test_rules_come_from_schema() {
        let form = quote_form("token");
        let phone = form.fields.iter().find(|f| f.name == "phone").unwrap();
        let rules: serde_json::Value = serde_json::from_str(&phone.rules).unwrap();

        assert!(phone.required);
        assert_eq!(rules.as_array().unwrap().len(), 3);
        assert_eq!(rules[1]["kind"], "pattern");
        assert_eq!(
            rules[1]["pattern"],
            r"^[\+]?[0-9\t\n\v\f\r \u{00A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}\-\(\)]+$"
        );
    }

    #[test]
    fn test_optional_fields_are_not_required() {
        let quote = quote_form("token");
        let company = quote.fields.iter().find(|f| f.name == "company").unwrap();
        assert!(!company.required);
        assert_eq!(company.rules, "[]");

        let message = message_form("token");
        let body = message.fields.iter().find(|f| f.name == "message").unwrap();
        assert!(!body.required);
        assert!(body.is_textarea());
    }

    #[test]
    fn test_selects_carry_options() {
        let form = message_form("token");
        let service = form.fields.iter().find(|f| f.name == "service").unwrap();

        assert!(service.is_select());
        assert_eq!(service.options().len(), 9);
        assert_eq!(service.options()[0].value, "legionella");
        assert_eq!(form.endpoint, "/api/sendMessage/sendMessage");
    }
}
