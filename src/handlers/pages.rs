use actix_web::http::header;
use actix_web::HttpResponse;

use crate::utils::session::SessionUser;

fn redirect(to: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, to))
        .finish()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}\n</body>\n</html>\n",
            title, body
        ))
}

// GET /
pub async fn index(session: Option<SessionUser>) -> HttpResponse {
    if session.is_some() {
        return redirect("/dashboard");
    }
    page(
        "Carbon Tracker",
        "<h1>Carbon Tracker</h1>\n<p>Log your daily travel, energy and meals to see your CO&#8322; footprint.</p>",
    )
}

// GET /dashboard
pub async fn dashboard(session: Option<SessionUser>) -> HttpResponse {
    let Some(session) = session else {
        return redirect("/");
    };
    page(
        "Dashboard | Carbon Tracker",
        &format!(
            "<h1>Welcome, {}</h1>\n<div id=\"dashboardScreen\" class=\"screen active\"></div>",
            escape_html(&session.name)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_escaped() {
        assert_eq!(escape_html("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }
}
