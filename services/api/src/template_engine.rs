//! Email Template Engine
//!
//! Handlebars-based rendering for the two submission notification emails.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::HashMap;

use leadform_models::Submission;

pub const ADMIN_NOTIFICATION: &str = "admin_notification";
pub const APPLICANT_RECEIPT: &str = "applicant_receipt";

/// Email template definition
#[derive(Debug, Clone)]
struct EmailTemplate {
    subject_template: String,
    body_html_template: String,
}

/// Template rendering result
#[derive(Debug, Clone)]
pub struct RenderedEmail {
    pub subject: String,
    pub body_html: String,
}

/// Variables available to the notification templates.
#[derive(Debug, Serialize)]
pub struct NotificationContext {
    pub name: String,
    pub affiliation: String,
    pub position: String,
    pub phone: String,
    pub email: String,
    /// Raw display summary; already HTML, rendered unescaped.
    pub items_summary: String,
    /// Comma-formatted total, e.g. `"420,000"`.
    pub total: String,
    /// Submission date as `YYYY-MM-DD`.
    pub date: String,
}

impl NotificationContext {
    pub fn from_submission(submission: &Submission) -> Self {
        Self {
            name: submission.name.clone(),
            affiliation: submission.affiliation.clone(),
            position: submission.position.clone(),
            phone: submission.phone.clone(),
            email: submission.email.clone(),
            items_summary: submission.items_summary.clone(),
            total: format_won(submission.total_amount),
            date: submission.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Template engine
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
    templates: HashMap<String, EmailTemplate>,
}

impl TemplateEngine {
    pub fn new() -> Self {
        let mut engine = Self {
            handlebars: Handlebars::new(),
            templates: HashMap::new(),
        };

        // Register built-in templates
        engine.register_builtin_templates();

        engine
    }

    fn register_builtin_templates(&mut self) {
        let admin_notification = EmailTemplate {
            subject_template: "[DB신청] {{name}} / {{affiliation}} / {{position}} / {{date}}"
                .to_string(),
            body_html_template: r#"
<h2>새로운 DB 신청이 접수되었습니다.</h2>
<p><strong>신청자:</strong> {{name}}</p>
<p><strong>소속:</strong> {{affiliation}}</p>
<p><strong>직급:</strong> {{position}}</p>
<p><strong>연락처:</strong> {{phone}}</p>
<p><strong>이메일:</strong> {{email}}</p>
<hr>
<h3>신청 내역</h3>
<div>{{{items_summary}}}</div>
<hr>
<p><strong>총 합계:</strong> {{total}}원</p>
<hr>
<div style="background-color: #f7f7f7; padding: 15px; border-radius: 5px; margin-top: 15px;">
  <p style="margin: 0; font-size: 14px; color: #333; font-weight: bold;">담당자가 수량 확인 및 입금안내 드릴 예정입니다.</p>
</div>
"#
            .to_string(),
        };
        self.register(ADMIN_NOTIFICATION, admin_notification);

        let applicant_receipt = EmailTemplate {
            subject_template: "[{{date}}] DB 신청이 정상적으로 접수되었습니다.".to_string(),
            body_html_template: r#"
<h2>DB 신청이 정상적으로 접수되었습니다.</h2>
<p>안녕하세요, {{name}}님. 신청해주셔서 감사합니다.</p>
<p>아래는 신청하신 내역입니다. 확인 후 담당자가 개별 연락드리겠습니다.</p>
<hr>
<h3>신청 내역</h3>
<div>{{{items_summary}}}</div>
<hr>
<p><strong>총 합계:</strong> {{total}}원</p>
<hr>
<div style="background-color: #f7f7f7; padding: 15px; border-radius: 5px; margin-top: 15px;">
  <p style="margin: 0; font-size: 14px; color: #333; font-weight: bold;">담당자가 수량 확인 및 입금안내 드릴 예정입니다.</p>
</div>
<br>
<p><em>*본 메일은 발신 전용입니다.</em></p>
"#
            .to_string(),
        };
        self.register(APPLICANT_RECEIPT, applicant_receipt);
    }

    fn register(&mut self, id: &str, template: EmailTemplate) {
        self.templates.insert(id.to_string(), template);
    }

    /// Render a registered template against the notification context.
    pub fn render(&self, template_id: &str, context: &NotificationContext) -> Result<RenderedEmail> {
        let template = self
            .templates
            .get(template_id)
            .with_context(|| format!("Unknown email template: {template_id}"))?;

        let subject = self
            .handlebars
            .render_template(&template.subject_template, context)
            .context("Failed to render subject template")?;
        let body_html = self
            .handlebars
            .render_template(&template.body_html_template, context)
            .context("Failed to render body template")?;

        Ok(RenderedEmail { subject, body_html })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Format an amount with thousands separators: 420000 -> "420,000".
pub fn format_won(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use leadform_models::SubmissionStatus;
    use uuid::Uuid;

    fn context() -> NotificationContext {
        let submission = Submission {
            id: Uuid::new_v4(),
            name: "홍길동".to_string(),
            affiliation: "THE FIN.".to_string(),
            position: "팀장".to_string(),
            phone: "010-1234-5678".to_string(),
            email: "applicant@example.com".to_string(),
            items_summary: "A업체 - [보장분석] 일반 (서울/인천/경기) (수량: 1, 금액: 80,000원)"
                .to_string(),
            total_amount: 80_000,
            status: SubmissionStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
        };
        NotificationContext::from_submission(&submission)
    }

    #[test]
    fn admin_subject_carries_applicant_and_date() {
        let engine = TemplateEngine::new();
        let rendered = engine.render(ADMIN_NOTIFICATION, &context()).unwrap();
        assert_eq!(rendered.subject, "[DB신청] 홍길동 / THE FIN. / 팀장 / 2024-03-15");
        assert!(rendered.body_html.contains("80,000원"));
    }

    #[test]
    fn applicant_receipt_renders_summary_unescaped() {
        let engine = TemplateEngine::new();
        let mut ctx = context();
        ctx.items_summary = "줄1<br>줄2".to_string();
        let rendered = engine.render(APPLICANT_RECEIPT, &ctx).unwrap();
        assert!(rendered.body_html.contains("줄1<br>줄2"));
        assert!(rendered.subject.starts_with("[2024-03-15]"));
    }

    #[test]
    fn unknown_template_is_an_error() {
        let engine = TemplateEngine::new();
        assert!(engine.render("missing", &context()).is_err());
    }

    #[test]
    fn test_format_won() {
        assert_eq!(format_won(0), "0");
        assert_eq!(format_won(999), "999");
        assert_eq!(format_won(80_000), "80,000");
        assert_eq!(format_won(1_234_000), "1,234,000");
        assert_eq!(format_won(-5_000), "-5,000");
    }
}
