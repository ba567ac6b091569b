//! Membership join and update forms.
//!
//! Both forms collect the same three sections. The update form is reached
//! through an emailed link: its `personal.email` comes from the validated
//! token and cannot be edited, and it adds a required SUGRiA work email.

use super::{Choice, FieldKind, FieldSpec, FormSchema, Rule, StepSpec, GENDERS};
use crate::models::FormKind;

/// Minimum age for membership.
pub const MIN_MEMBER_AGE: i16 = 18;

/// Domain every staff work email must belong to.
pub const WORK_EMAIL_DOMAIN: &str = "@sugria.com";

const EDUCATION_LEVELS: &[Choice] = &[
    Choice { value: "certificate", label: "Certificate" },
    Choice { value: "diploma", label: "Diploma" },
    Choice { value: "degree", label: "Degree" },
    Choice { value: "masters", label: "Masters" },
    Choice { value: "phd", label: "PhD" },
];

fn personal_step(update: bool) -> StepSpec {
    let mut step = StepSpec::new("Personal Information", "personal");
    if update {
        step = step.field(
            FieldSpec::new("workEmail", "Sugria Work Email", FieldKind::Email)
                .placeholder("example@sugria.com")
                .summary("Work Email")
                .rule(Rule::Domain(WORK_EMAIL_DOMAIN)),
        );
    }

    let email = FieldSpec::new("email", "Email Address", FieldKind::Email).summary("Email");
    step.field(
        FieldSpec::new("fullName", "Full Name", FieldKind::Text).rule(Rule::FullName),
    )
    .field(if update { email.read_only() } else { email })
    .field(
        FieldSpec::new("dateOfBirth", "Date of Birth", FieldKind::Date)
            .rule(Rule::MinAge(MIN_MEMBER_AGE)),
    )
    .field(FieldSpec::new("gender", "Gender", FieldKind::Choice(GENDERS)))
    .field(FieldSpec::new("nationality", "Nationality", FieldKind::Text))
    .field(
        FieldSpec::new("phoneNumber", "Phone Number", FieldKind::Phone).placeholder("0801234567"),
    )
    .field(FieldSpec::new("address", "Residential Address", FieldKind::LongText))
}

fn emergency_step() -> StepSpec {
    StepSpec::new("Emergency Contact", "emergency")
        .field(
            FieldSpec::new("name", "Contact Name", FieldKind::Text)
                .summary("Emergency Contact Name"),
        )
        .field(FieldSpec::new("relationship", "Relationship", FieldKind::Text))
        .field(
            FieldSpec::new("phoneNumber", "Contact Phone", FieldKind::Phone)
                .summary("Emergency Contact Phone"),
        )
}

fn education_step() -> StepSpec {
    StepSpec::new("Education", "education")
        .field(FieldSpec::new(
            "level",
            "Highest Level of Education",
            FieldKind::Choice(EDUCATION_LEVELS),
        ))
        .field(FieldSpec::new("institution", "Institution Name", FieldKind::Text))
        .field(FieldSpec::new("fieldOfStudy", "Field of Study", FieldKind::Text))
        .field(
            FieldSpec::new(
                "certifications",
                "Other Relevant Certifications",
                FieldKind::LongText,
            )
            .optional(),
        )
}

pub(super) fn join_schema() -> FormSchema {
    FormSchema {
        kind: FormKind::Join,
        title: "Join the Movement",
        steps: vec![personal_step(false), emergency_step(), education_step()],
    }
}

pub(super) fn update_schema() -> FormSchema {
    FormSchema {
        kind: FormKind::Update,
        title: "Update Your Membership",
        steps: vec![personal_step(true), emergency_step(), education_step()],
    }
}
