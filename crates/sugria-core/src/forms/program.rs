//! Funding program application form.

use super::{Choice, FieldKind, FieldSpec, FormSchema, StepSpec, GENDERS};
use crate::{models::FormKind, validation::FileRules};

pub const PROGRAMS: &[Choice] = &[
    Choice { value: "rural", label: "Rural Farmers Program" },
    Choice { value: "suburban", label: "Suburban Farmers Program" },
    Choice { value: "pioneer", label: "Pioneer Pathways" },
];

const TRAINING_MODES: &[Choice] = &[
    Choice { value: "in-person", label: "In-person Training" },
    Choice { value: "virtual", label: "Virtual Training" },
];

fn program_step() -> StepSpec {
    StepSpec::new("Select Program", "program")
        .field(
            FieldSpec::new("category", "Program Category", FieldKind::Choice(PROGRAMS))
                .prompt("Please select a program"),
        )
        .field(
            FieldSpec::new(
                "previousTraining",
                "Have you attended a previous SUGRiA training?",
                FieldKind::Flag,
            )
            .optional(),
        )
        .field(
            FieldSpec::new("trainingId", "Training Ticket ID", FieldKind::Text)
                .required_when("previousTraining")
                .prompt("Please enter your Training Ticket ID")
                .summary("Previous Training ID"),
        )
}

fn personal_step() -> StepSpec {
    StepSpec::new("Personal Information", "personal")
        .field(
            FieldSpec::new("fullName", "Full Name", FieldKind::Text)
                .prompt("Please enter your full name"),
        )
        .field(
            FieldSpec::new("email", "Email Address", FieldKind::Email)
                .prompt("Please enter your email")
                .summary("Email"),
        )
        .field(
            FieldSpec::new("phoneNumber", "Phone Number", FieldKind::Phone)
                .prompt("Please enter your phone number"),
        )
        .field(
            FieldSpec::new("address", "Residential Address", FieldKind::LongText)
                .prompt("Please enter your address")
                .summary("Address"),
        )
        .field(
            FieldSpec::new("gender", "Gender", FieldKind::Choice(GENDERS))
                .prompt("Please enter your gender"),
        )
        .field(
            FieldSpec::new("dateOfBirth", "Date of Birth", FieldKind::Date)
                .prompt("Please enter your date of birth"),
        )
}

fn farm_step() -> StepSpec {
    StepSpec::new("Farm Details", "farm")
        .field(
            FieldSpec::new("location", "Farm Location", FieldKind::Text)
                .prompt("Please enter your farm location"),
        )
        .field(
            FieldSpec::new("size", "Farm Size", FieldKind::Number)
                .placeholder("Size in hectares")
                .prompt("Please enter your farm size")
                .invalid("Please enter a valid farm size (must be greater than 0)"),
        )
        .field(
            FieldSpec::new("type", "Types of Crops/Livestock", FieldKind::Text)
                .prompt("Please enter your farm type")
                .summary("Farm Type"),
        )
        .field(
            FieldSpec::new("practices", "Current Farming Practices", FieldKind::LongText)
                .prompt("Please enter your farm practices")
                .summary("Farming Practices"),
        )
        .field(
            FieldSpec::new("challenges", "Current Challenges", FieldKind::LongText)
                .prompt("Please enter your farm challenges")
                .summary("Farm Challenges"),
        )
}

fn grant_step() -> StepSpec {
    StepSpec::new("Grant Purpose", "grant")
        .field(
            FieldSpec::new("outcomes", "Expected Outcomes", FieldKind::LongText)
                .prompt("Please describe your expected outcomes")
                .summary("Grant Outcomes"),
        )
        .field(
            FieldSpec::new(
                "budget",
                "Budget Document",
                FieldKind::File(FileRules::documents()),
            )
            .prompt("Please upload your budget document"),
        )
}

fn training_step() -> StepSpec {
    StepSpec::new("Training Preferences", "training").field(
        FieldSpec::new(
            "preference",
            "Training Preference",
            FieldKind::Choice(TRAINING_MODES),
        )
        .prompt("Please select a training preference"),
    )
}

fn motivation_step() -> StepSpec {
    StepSpec::new("Motivation Statement", "motivation")
        .field(
            FieldSpec::new("statement", "Motivation Statement", FieldKind::LongText)
                .prompt("Please explain why you want to participate"),
        )
        .field(
            FieldSpec::new("implementation", "Implementation Plan", FieldKind::LongText)
                .prompt("Please describe how you plan to apply the knowledge"),
        )
        .field(
            FieldSpec::new(
                "identity",
                "Proof of Identity",
                FieldKind::File(FileRules::identity()),
            )
            .prompt("Please upload your proof of identity")
            .summary("Identification Document"),
        )
}

fn declaration_step() -> StepSpec {
    StepSpec::new("Declaration", "declaration")
        .field(
            FieldSpec::new(
                "agreed",
                "I declare that the information provided is true and agree to the terms and conditions",
                FieldKind::Flag,
            )
            .prompt("Please agree to the terms and conditions")
            .summary("Declaration Agreement"),
        )
        .field(
            FieldSpec::new(
                "officerName",
                "SUGRiA Officer/Community Leader Name",
                FieldKind::Text,
            )
            .prompt("Please enter the SUGRiA Officer/Community Leader name")
            .summary("Officer Name"),
        )
}

pub(super) fn program_schema() -> FormSchema {
    FormSchema {
        kind: FormKind::Program,
        title: "Program Application",
        steps: vec![
            program_step(),
            personal_step(),
            farm_step(),
            grant_step(),
            training_step(),
            motivation_step(),
            declaration_step(),
        ],
    }
}
