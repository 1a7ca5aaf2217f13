use serde::Serialize;

use crate::error::MailupError;
use crate::resources::{DynamicField, Import, ListGroup, MailingList, Recipient, ResultSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Pretty,
    Json,
}

impl OutputMode {
    pub fn from_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Pretty
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

pub fn format_lists(lists: &[MailingList]) -> String {
    if lists.is_empty() {
        return "No mailing lists.".to_string();
    }
    let mut out = String::new();
    for list in lists {
        out.push_str(&format!("{:>6}  {}", list.id, list.name));
        if !list.description.is_empty() {
            out.push_str(&format!("  ({})", list.description));
        }
        out.push('\n');
    }
    out
}

pub fn format_groups(groups: &[ListGroup]) -> String {
    if groups.is_empty() {
        return "No groups.".to_string();
    }
    let mut out = String::new();
    for group in groups {
        let flag = if group.deletable { "" } else { "  [locked]" };
        out.push_str(&format!("{:>6}  {}{}\n", group.id, group.name, flag));
    }
    out
}

pub fn format_recipient(recipient: &Recipient) -> String {
    let id = recipient
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!("{id:>8}  {}", recipient.email);
    if !recipient.name.is_empty() {
        line.push_str(&format!("  {}", recipient.name));
    }
    if !recipient.mobile_number.is_empty() {
        line.push_str(&format!("  +{} {}", recipient.mobile_prefix, recipient.mobile_number));
    }
    line
}

/// Valid recipients first, then one `!` line per item that failed to decode.
pub fn format_result_set(results: &ResultSet) -> String {
    let mut out = String::new();
    for recipient in results.valid_results() {
        out.push_str(&format_recipient(recipient));
        out.push('\n');
    }
    for error in results.errors() {
        out.push_str(&format!("! {error}\n"));
    }
    if out.is_empty() {
        out.push_str("No recipients.");
    }
    out
}

pub fn result_set_json(results: &ResultSet) -> serde_json::Value {
    serde_json::json!({
        "recipients": results.valid_results(),
        "errors": results.errors(),
    })
}

pub fn format_import(import: &Import) -> String {
    let state = if import.completed { "completed" } else { "in progress" };
    format!(
        "Import {} {state}\n  imported: {}\n  valid:    {}\n  invalid:  {}\n  created:  {}\n  updated:  {}",
        import.id,
        import.imported_recipients,
        import.valid_recipients,
        import.not_valid_recipients,
        import.created_recipients,
        import.updated_recipients,
    )
}

pub fn format_fields(fields: &[DynamicField]) -> String {
    if fields.is_empty() {
        return "No dynamic fields.".to_string();
    }
    fields
        .iter()
        .map(|field| format!("{:>4}  {}", field.id, field.field_name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_error(err: &MailupError, json_mode: bool) {
    if json_mode {
        print_json(&err.to_json());
    } else {
        eprintln!("Error: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_flag() {
        assert_eq!(OutputMode::from_flag(true), OutputMode::Json);
        assert_eq!(OutputMode::from_flag(false), OutputMode::Pretty);
    }

    #[test]
    fn lists_show_id_name_and_description() {
        let mut list = MailingList::with_id(7);
        list.name = "News".into();
        list.description = "Weekly".into();
        assert_eq!(format_lists(&[list]), "     7  News  (Weekly)\n");
        assert_eq!(format_lists(&[]), "No mailing lists.");
    }

    #[test]
    fn locked_groups_are_marked() {
        let groups = vec![
            ListGroup::new(1, 10, "VIP"),
            ListGroup::new(1, 11, "Test").with_deletable(true),
        ];
        let out = format_groups(&groups);
        assert!(out.contains("VIP  [locked]"));
        assert!(out.contains("    11  Test\n"));
    }

    #[test]
    fn recipient_line_includes_mobile() {
        let recipient = Recipient::new("Jane", "jane@example.com", "3331234567", "39").with_id(5);
        assert_eq!(
            format_recipient(&recipient),
            "       5  jane@example.com  Jane  +39 3331234567"
        );
    }

    #[test]
    fn result_set_lists_errors_after_recipients() {
        let results: ResultSet = vec![
            Ok(Recipient::new("", "a@example.com", "", "").with_id(1)),
            Err("missing field `Email`".to_string()),
        ]
        .into_iter()
        .collect();
        let out = format_result_set(&results);
        assert_eq!(out, "       1  a@example.com\n! missing field `Email`\n");

        let json = result_set_json(&results);
        assert_eq!(json["recipients"][0]["Email"], "a@example.com");
        assert_eq!(json["errors"][0], "missing field `Email`");
    }

    #[test]
    fn empty_result_set() {
        assert_eq!(format_result_set(&ResultSet::new()), "No recipients.");
    }

    #[test]
    fn import_summary() {
        let import: Import =
            serde_json::from_str(r#"{"idImport": 3, "Completed": true, "ValidRecipients": 2}"#).unwrap();
        let out = format_import(&import);
        assert!(out.starts_with("Import 3 completed"));
        assert!(out.contains("valid:    2"));
    }

    #[test]
    fn fields_table() {
        let fields = vec![DynamicField::new("name", "", 1), DynamicField::new("city", "", 2)];
        assert_eq!(format_fields(&fields), "   1  name\n   2  city");
    }

    #[test]
    fn print_error_both_modes() {
        let err = MailupError::MissingOption("client_id");
        print_error(&err, true);
        print_error(&err, false);
    }
}
