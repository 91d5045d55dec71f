//! Status-change notification dispatcher.
//!
//! Emails are rendered from HTML templates with `{{Key}}` interpolation and
//! non-nested `{{#if Key}}...{{/if}}` blocks (plain regex substitution, not
//! a templating engine). Dispatch is fire-and-forget: the status mutation
//! has already committed, and send failures are logged and suppressed.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::{
    models::visitor::{Visitor, VisitorStatus},
    services::email::EmailService,
};

static IF_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{#if\s+(\w+)\}\}(.*?)\{\{/if\}\}").unwrap());
static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{(\w+)\}\}").unwrap());

/// Substitute `{{#if Key}}` blocks then `{{Key}}` placeholders. Absent or
/// empty keys drop the block / render as an empty string.
pub fn render_template(template: &str, data: &HashMap<String, String>) -> String {
    let with_conditionals = IF_BLOCK.replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        match data.get(key) {
            Some(value) if !value.is_empty() => caps[2].to_string(),
            _ => String::new(),
        }
    });

    PLACEHOLDER
        .replace_all(&with_conditionals, |caps: &regex::Captures| {
            data.get(&caps[1]).cloned().unwrap_or_default()
        })
        .into_owned()
}

const APPROVAL_REQUEST_HTML: &str = r#"<html><body>
<h2>Visitor approval requested</h2>
<p>{{VisitorName}}{{#if CompanyName}} from {{CompanyName}}{{/if}} has registered to meet you.</p>
<ul>
<li>Purpose: {{Purpose}}</li>
<li>Scheduled: {{ScheduledTime}}</li>
<li>Phone: {{Phone}}</li>
</ul>
<p><a href="{{ApproveUrl}}">Approve this visit</a> (link valid for {{LinkValidDays}} days)</p>
</body></html>"#;

const STATUS_CHANGE_HTML: &str = r#"<html><body>
<h2>Your visit is {{StatusLabel}}</h2>
<p>Hello {{VisitorName}},</p>
<p>Your visit scheduled for {{ScheduledTime}} is now <strong>{{StatusLabel}}</strong>.</p>
{{#if Notes}}<p>Note from the team: {{Notes}}</p>{{/if}}
</body></html>"#;

fn status_label(status: VisitorStatus) -> Option<&'static str> {
    match status {
        VisitorStatus::Approved => Some("approved"),
        VisitorStatus::Rejected => Some("declined"),
        VisitorStatus::Rescheduled => Some("rescheduled"),
        // Desk events do not notify the visitor
        VisitorStatus::AwaitingApproval | VisitorStatus::CheckedIn | VisitorStatus::CheckedOut => {
            None
        }
    }
}

fn visitor_data(visitor: &Visitor) -> HashMap<String, String> {
    let mut data = HashMap::new();
    data.insert("VisitorName".to_string(), visitor.full_name.clone());
    data.insert("Purpose".to_string(), visitor.purpose_of_visit.clone());
    data.insert("Phone".to_string(), visitor.phone_number.clone());
    data.insert(
        "ScheduledTime".to_string(),
        visitor.scheduled_time.format("%Y-%m-%d %H:%M UTC").to_string(),
    );
    if let Some(ref company) = visitor.company_name {
        data.insert("CompanyName".to_string(), company.clone());
    }
    if let Some(ref notes) = visitor.notes {
        data.insert("Notes".to_string(), notes.clone());
    }
    data
}

/// Strip tags for the plain-text alternative part
fn text_fallback(html: &str) -> String {
    static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
    TAG.replace_all(html, " ").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Clone)]
pub struct NotificationDispatcher {
    email: EmailService,
}

impl NotificationDispatcher {
    pub fn new(email: EmailService) -> Self {
        Self { email }
    }

    fn dispatch(&self, to: String, subject: String, html: String) {
        if !self.email.is_enabled() {
            tracing::debug!("Email disabled, skipping notification to {}", to);
            return;
        }
        let email = self.email.clone();
        tokio::spawn(async move {
            let text = text_fallback(&html);
            if let Err(e) = email.send_email(&to, &subject, &text, &html).await {
                tracing::warn!("Failed to send notification to {}: {}", to, e);
            }
        });
    }

    /// Email the named staff member a one-click approval link
    pub fn approval_requested(
        &self,
        visitor: &Visitor,
        staff_email: &str,
        approve_url: &str,
        link_valid_days: i64,
    ) {
        let mut data = visitor_data(visitor);
        data.insert("ApproveUrl".to_string(), approve_url.to_string());
        data.insert("LinkValidDays".to_string(), link_valid_days.to_string());
        let html = render_template(APPROVAL_REQUEST_HTML, &data);
        self.dispatch(
            staff_email.to_string(),
            format!("Visitor approval requested: {}", visitor.full_name),
            html,
        );
    }

    /// Tell the visitor about an approval/rejection/reschedule. Visitors
    /// without an email address, and desk-only transitions, are skipped.
    pub fn status_changed(&self, visitor: &Visitor) {
        let (Some(label), Some(to)) = (status_label(visitor.status), visitor.email.clone()) else {
            return;
        };
        let mut data = visitor_data(visitor);
        data.insert("StatusLabel".to_string(), label.to_string());
        let html = render_template(STATUS_CHANGE_HTML, &data);
        self.dispatch(to, format!("Your visit is {}", label), html);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn placeholders_are_substituted() {
        let out = render_template("Hello {{Name}}!", &data(&[("Name", "Jane")]));
        assert_eq!(out, "Hello Jane!");
    }

    #[test]
    fn missing_placeholder_renders_empty() {
        let out = render_template("Hello {{Name}}!", &data(&[]));
        assert_eq!(out, "Hello !");
    }

    #[test]
    fn if_block_kept_when_key_present() {
        let out = render_template(
            "a{{#if X}} has {{X}}{{/if}}b",
            &data(&[("X", "value")]),
        );
        assert_eq!(out, "a has valueb");
    }

    #[test]
    fn if_block_dropped_when_key_absent_or_empty() {
        let template = "a{{#if X}}never{{/if}}b";
        assert_eq!(render_template(template, &data(&[])), "ab");
        assert_eq!(render_template(template, &data(&[("X", "")])), "ab");
    }

    #[test]
    fn if_blocks_can_span_lines() {
        let out = render_template("{{#if X}}line1\nline2{{/if}}", &data(&[("X", "y")]));
        assert_eq!(out, "line1\nline2");
    }

    #[test]
    fn approval_email_renders_configured_validity_window() {
        let rendered = render_template(
            APPROVAL_REQUEST_HTML,
            &data(&[
                ("VisitorName", "Jane Doe"),
                ("Purpose", "Interview"),
                ("Phone", "5550100"),
                ("ScheduledTime", "2026-09-01 10:00 UTC"),
                ("ApproveUrl", "http://localhost:8080/approve"),
                ("LinkValidDays", "14"),
            ]),
        );
        assert!(rendered.contains("link valid for 14 days"));
        assert!(!rendered.contains("{{LinkValidDays}}"));
    }

    #[test]
    fn status_labels_cover_visitor_facing_transitions() {
        assert_eq!(status_label(VisitorStatus::Approved), Some("approved"));
        assert_eq!(status_label(VisitorStatus::Rejected), Some("declined"));
        assert_eq!(status_label(VisitorStatus::Rescheduled), Some("rescheduled"));
        assert_eq!(status_label(VisitorStatus::CheckedIn), None);
        assert_eq!(status_label(VisitorStatus::CheckedOut), None);
    }
}
