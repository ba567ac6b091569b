//! Table wrappers for admin listings and stored drafts.

use std::fmt;

use super::{datetime::LocalDateTime, models::program_label};
use crate::{
    listing::{PageMarker, Paged},
    models::{Application, Draft, Member},
};

fn write_pager<T>(f: &mut fmt::Formatter<'_>, paged: &Paged<T>, noun: &str) -> fmt::Result {
    writeln!(f)?;
    let markers = paged
        .markers()
        .iter()
        .map(|m| match m {
            PageMarker::Page(n) if *n == paged.page => format!("[{n}]"),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(
        f,
        "Page {} of {} ({} {noun}): {markers}",
        paged.page,
        paged.pages.max(1),
        paged.total
    )
}

/// One page of members as a markdown table.
pub struct MemberTable(pub Paged<Member>);

impl fmt::Display for MemberTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.items.is_empty() {
            return writeln!(f, "No members found.");
        }
        writeln!(f, "| ID | Name | Email | Phone |")?;
        writeln!(f, "|:-|:-|:-|:-|")?;
        for member in &self.0.items {
            writeln!(
                f,
                "| {} | {} | {} | {} |",
                member.id,
                member.full_name(),
                member.email,
                member.phone_number.as_deref().unwrap_or("-")
            )?;
        }
        write_pager(f, &self.0, "members")
    }
}

/// One page of applications as a markdown table.
pub struct ApplicationTable(pub Paged<Application>);

impl fmt::Display for ApplicationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.items.is_empty() {
            return writeln!(f, "No applications found.");
        }
        writeln!(f, "| Application | Applicant | Email | Program | Status |")?;
        writeln!(f, "|:-|:-|:-|:-|:-|")?;
        for application in &self.0.items {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} |",
                application.application_id,
                application.personal.full_name,
                application.personal.email,
                program_label(&application.program.category),
                application.status
            )?;
        }
        write_pager(f, &self.0, "applications")
    }
}

/// Stored drafts, one line each.
pub struct Drafts(pub Vec<Draft>);

impl fmt::Display for Drafts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No forms in progress.");
        }
        writeln!(f, "# Forms in progress")?;
        writeln!(f)?;
        for draft in &self.0 {
            let wizard = draft.clone().into_wizard();
            let view = wizard.view();
            let status = if view.submitting {
                " (submitting)"
            } else if view.error.is_some() {
                " (last submission failed)"
            } else {
                ""
            };
            writeln!(
                f,
                "- **{}**: step {} of {}, {}{status}; updated {}",
                draft.kind(),
                view.index + 1,
                view.count,
                view.title,
                LocalDateTime(&draft.updated_at)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::paginate;

    fn member(id: u64) -> Member {
        Member {
            id,
            first_name: format!("Member{id}"),
            last_name: "Test".into(),
            email: format!("m{id}@example.com"),
            work_email: None,
            date_of_birth: None,
            gender: None,
            nationality: None,
            phone_number: None,
            residential_address: None,
            emergency_contact: None,
            education: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_member_table_pager() {
        let members = (1..=35).map(member).collect::<Vec<_>>();
        let output = MemberTable(paginate(members, 2, 10)).to_string();

        assert!(output.contains("| 11 | Member11 Test | m11@example.com | - |"));
        assert!(!output.contains("| 21 |"));
        assert!(output.contains("Page 2 of 4 (35 members): 1 [2] 3 4"));
    }

    #[test]
    fn test_empty_tables() {
        let output = ApplicationTable(paginate(Vec::new(), 1, 10)).to_string();
        assert_eq!(output, "No applications found.\n");
        assert_eq!(Drafts(Vec::new()).to_string(), "No forms in progress.\n");
    }
}
