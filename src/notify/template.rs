use crate::db::Application;

pub const SUBJECT: &str = "Application Received";

const FALLBACK_NAME: &str = "Applicant";

/// Rendered confirmation email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub fn render(application: &Application, company: &str) -> Confirmation {
    let name = application
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME);

    Confirmation {
        subject: SUBJECT.to_string(),
        text: render_text(name, company),
        html: render_html(&escape_html(name), &escape_html(company)),
    }
}

fn render_text(name: &str, company: &str) -> String {
    format!(
        "Dear {name},\n\n\
         Thank you for applying to {company}. We have received your application and will review it soon.\n\n\
         Best regards,\n\
         {company} Team"
    )
}

fn render_html(name: &str, company: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0"/>
  <title>Application Submitted Successfully</title>
  <style>
    body {{ font-family: Arial, sans-serif; background-color: #f4f4f4; padding: 0; margin: 0; }}
    .email-wrapper {{ max-width: 600px; margin: 40px auto; background: #fff; border-radius: 10px; padding: 30px; box-shadow: 0 2px 8px rgba(0,0,0,0.05); }}
    h2 {{ color: #9e1c18; }}
    p {{ font-size: 16px; color: #555; line-height: 1.6; }}
    .accent {{ color: #9e1c18; }}
    .footer {{ font-size: 13px; color: #aaa; margin-top: 30px; }}
  </style>
</head>
<body>
  <div class="email-wrapper">
    <h2>Application Submitted Successfully</h2>
    <p>Dear {name},</p>
    <p>Thank you for applying to <strong class="accent">{company}</strong>. We have successfully received your application. Our team will review your submission and get back to you if your qualifications match our requirements.</p>
    <p><strong class="accent">Best regards,</strong><br/>{company} Hiring Team</p>
    <div class="footer">&copy; {company}. All rights reserved.</div>
  </div>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn application(name: Option<&str>) -> Application {
        Application {
            id: 1,
            name: name.map(str::to_string),
            email: Some("applicant@example.com".into()),
            mobile: None,
            gender: None,
            degree: None,
            experience: None,
            how_know: None,
            resume: None,
            position: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn greets_by_name() {
        let mail = render(&application(Some("Ada Lovelace")), "Brightloom");
        assert_eq!(mail.subject, "Application Received");
        assert!(mail.text.starts_with("Dear Ada Lovelace,"));
        assert!(mail.text.ends_with("Brightloom Team"));
        assert!(mail.html.contains("<p>Dear Ada Lovelace,</p>"));
    }

    #[test]
    fn blank_name_falls_back() {
        for name in [None, Some(""), Some("   ")] {
            let mail = render(&application(name), "Brightloom");
            assert!(mail.text.starts_with("Dear Applicant,"));
        }
    }

    #[test]
    fn html_body_escapes_applicant_text() {
        let mail = render(&application(Some("<script>x</script>")), "Brightloom");
        assert!(!mail.html.contains("<script>"));
        assert!(mail.html.contains("&lt;script&gt;"));
        // plain text is sent verbatim
        assert!(mail.text.contains("<script>x</script>"));
    }
}
