//! Display implementations for domain models.
//!
//! Admin records render as markdown detail pages; enums render as their
//! wire names.

use std::fmt;

use super::datetime::{LocalDateTime, MaybeDateTime};
use crate::{
    forms::PROGRAMS,
    models::{
        AdminSession, Application, ApplicationStatus, Collection, DashboardStats, FormKind, Member,
    },
};

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or("-")
}

/// Human label of a program category value.
pub(crate) fn program_label(value: &str) -> &str {
    PROGRAMS
        .iter()
        .find(|c| c.value == value)
        .map_or(value, |c| c.label)
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.full_name())?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", self.email)?;
        if let Some(work_email) = &self.work_email {
            writeln!(f, "- **Work email**: {work_email}")?;
        }
        writeln!(f, "- **Phone**: {}", or_dash(self.phone_number.as_deref()))?;
        writeln!(f, "- **Date of birth**: {}", or_dash(self.date_of_birth.as_deref()))?;
        writeln!(f, "- **Gender**: {}", or_dash(self.gender.as_deref()))?;
        writeln!(f, "- **Nationality**: {}", or_dash(self.nationality.as_deref()))?;
        writeln!(
            f,
            "- **Address**: {}",
            or_dash(self.residential_address.as_deref())
        )?;
        writeln!(f, "- **Joined**: {}", MaybeDateTime(self.created_at.as_ref()))?;

        if let Some(contact) = &self.emergency_contact {
            writeln!(f, "\n## Emergency Contact\n")?;
            writeln!(f, "- **Name**: {}", contact.name)?;
            writeln!(f, "- **Relationship**: {}", contact.relationship)?;
            writeln!(f, "- **Phone**: {}", contact.phone_number)?;
        }

        if let Some(education) = &self.education {
            writeln!(f, "\n## Education\n")?;
            writeln!(f, "- **Level**: {}", education.highest_level)?;
            writeln!(f, "- **Institution**: {}", education.institution_name)?;
            writeln!(f, "- **Field of study**: {}", education.field_of_study)?;
            writeln!(
                f,
                "- **Other certifications**: {}",
                or_dash(education.other_certifications.as_deref())
            )?;
        }

        Ok(())
    }
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} ({})", self.application_id, self.status)?;
        writeln!(f)?;
        writeln!(f, "- **Applicant**: {}", self.personal.full_name)?;
        writeln!(f, "- **Email**: {}", self.personal.email)?;
        writeln!(f, "- **Phone**: {}", or_dash(Some(self.personal.phone_number.as_str())))?;
        writeln!(f, "- **Program**: {}", program_label(&self.program.category))?;
        if self.program.previous_training {
            match &self.program.training_id {
                Some(id) => writeln!(f, "- **Previous training**: yes (ticket {id})")?,
                None => writeln!(f, "- **Previous training**: yes")?,
            }
        }
        writeln!(f, "- **Submitted**: {}", MaybeDateTime(self.submitted_at.as_ref()))?;

        if let Some(farm) = &self.farm {
            writeln!(f, "\n## Farm\n")?;
            writeln!(f, "- **Location**: {}", farm.location)?;
            writeln!(f, "- **Size**: {} hectares", farm.size)?;
            writeln!(f, "- **Crops/Livestock**: {}", farm.kind)?;
            writeln!(f, "- **Practices**: {}", farm.practices)?;
            writeln!(f, "- **Challenges**: {}", farm.challenges)?;
        }
        if let Some(grant) = &self.grant {
            writeln!(f, "\n## Grant Purpose\n")?;
            writeln!(f, "{}", grant.outcomes)?;
            if grant.budget_file.is_some() {
                writeln!(f, "\nBudget document on file.")?;
            }
        }
        if let Some(training) = &self.training {
            writeln!(f, "\n## Training\n")?;
            writeln!(f, "- **Preference**: {}", training.preference)?;
        }
        if let Some(motivation) = &self.motivation {
            writeln!(f, "\n## Motivation\n")?;
            writeln!(f, "{}", motivation.statement)?;
            writeln!(f, "\n### Implementation Plan\n")?;
            writeln!(f, "{}", motivation.implementation)?;
            if motivation.identity_file.is_some() {
                writeln!(f, "\nIdentity document on file.")?;
            }
        }
        if let Some(declaration) = &self.declaration {
            writeln!(f, "\n## Declaration\n")?;
            writeln!(
                f,
                "- **Agreed**: {}",
                if declaration.agreed { "yes" } else { "no" }
            )?;
            writeln!(f, "- **Officer**: {}", declaration.officer_name)?;
        }

        Ok(())
    }
}

impl fmt::Display for DashboardStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Dashboard")?;
        writeln!(f)?;
        writeln!(f, "- **Members**: {}", self.total_members)?;
        writeln!(f, "- **Applications**: {}", self.total_applications)
    }
}

impl fmt::Display for AdminSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Signed in as **{}** ({}) since {}",
            self.email,
            self.role,
            LocalDateTime(&self.signed_in_at)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplicantPersonal, ApplicantProgram};

    #[test]
    fn test_application_display() {
        let application = Application {
            id: Some(3),
            application_id: "APP-003".into(),
            status: ApplicationStatus::Approved,
            submitted_at: None,
            program: ApplicantProgram {
                category: "pioneer".into(),
                previous_training: true,
                training_id: None,
            },
            personal: ApplicantPersonal {
                full_name: "Ngozi Eze".into(),
                email: "ngozi@example.com".into(),
                ..Default::default()
            },
            farm: None,
            grant: None,
            training: None,
            motivation: None,
            declaration: None,
        };
        let output = application.to_string();
        assert!(output.starts_with("# APP-003 (approved)"));
        assert!(output.contains("- **Program**: Pioneer Pathways"));
        assert!(output.contains("- **Phone**: -"));
        assert!(output.contains("- **Submitted**: -"));
        assert!(!output.contains("## Farm"));
    }

    #[test]
    fn test_program_label_falls_back_to_value() {
        assert_eq!(program_label("rural"), "Rural Farmers Program");
        assert_eq!(program_label("unknown"), "unknown");
    }
}
