use soplint_ast::TreeNode;

use super::RuleContext;
use crate::report::Reporter;
use crate::tables::{ROLES_HEADERS, body_rows};

const REQUIRED_ROLES: [&str; 3] = ["Author", "Reviewer", "Approver"];

pub(super) fn check_roles<N: TreeNode>(ctx: &RuleContext<'_, '_, N>, reporter: &mut Reporter) {
    let Some(table) = ctx.document.table(ROLES_HEADERS) else {
        reporter.error("Roles and Responsibilities table is missing or incorrectly formatted.");
        return;
    };

    let mut found = [false; REQUIRED_ROLES.len()];

    for row in body_rows(table) {
        let [role, full_name, _, _] = row.as_slice() else {
            reporter.error(format!(
                "Roles and Responsibilities table row is incorrectly formatted (expected 4 columns): '{}'.",
                row.join(" | ")
            ));
            continue;
        };

        if full_name.is_empty() {
            continue;
        }
        if let Some(index) = REQUIRED_ROLES
            .iter()
            .position(|required| required.eq_ignore_ascii_case(role))
        {
            found[index] = true;
        }
    }

    for (role, found) in REQUIRED_ROLES.iter().zip(found) {
        if !found {
            reporter.error(format!(
                "Role '{}' is missing a non-empty Full Name row in the Roles and Responsibilities table.",
                role
            ));
        }
    }
}
