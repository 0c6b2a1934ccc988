use crate::password::{evaluate, Strength};
use crate::posts::{excerpt, find, newest_first};
use crate::quiz::QuizRunner;
use crate::reports::{recent, visible};
use crate::state::AppState;
use crate::types::{Post, VoteType};
use crate::votes::vote_for;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

const EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Phishing,
    Security,
    Gaming,
    Social,
    Grooming,
    Admin,
}

impl Page {
    /// Pages listed in the navigation bar. The admin page is reached from
    /// the grooming blog.
    pub const NAV: [Page; 6] = [
        Page::Home,
        Page::Phishing,
        Page::Security,
        Page::Gaming,
        Page::Social,
        Page::Grooming,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Phishing => "phishing",
            Page::Security => "security",
            Page::Gaming => "gaming",
            Page::Social => "social",
            Page::Grooming => "grooming",
            Page::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "Inicio",
            Page::Phishing => "Phishing",
            Page::Security => "Ciberseguridad",
            Page::Gaming => "Videojuegos",
            Page::Social => "Redes Sociales",
            Page::Grooming => "Grooming",
            Page::Admin => "Administrador",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Phishing => "/phishing",
            Page::Security => "/security",
            Page::Gaming => "/gaming",
            Page::Social => "/social",
            Page::Grooming => "/grooming",
            Page::Admin => "/admin",
        }
    }

    /// Unknown slugs fall back to the home page.
    pub fn from_slug(slug: &str) -> Page {
        match slug {
            "phishing" => Page::Phishing,
            "security" => Page::Security,
            "gaming" => Page::Gaming,
            "social" => Page::Social,
            "grooming" => Page::Grooming,
            "admin" => Page::Admin,
            _ => Page::Home,
        }
    }

    pub fn render(self, view: &View<'_>) -> String {
        let body = match self {
            Page::Home => home(view),
            Page::Phishing => phishing(view),
            Page::Security => security(view),
            Page::Gaming => gaming(),
            Page::Social => social(),
            Page::Grooming => grooming(view),
            Page::Admin => admin(view),
        };
        layout(self, &body)
    }
}

/// What a render call needs: the application state, the clock and the
/// per-request input of the security page.
pub struct View<'a> {
    pub state: &'a AppState,
    pub now: DateTime<Utc>,
    pub password: &'a str,
}

impl<'a> View<'a> {
    pub fn new(state: &'a AppState, now: DateTime<Utc>) -> Self {
        Self {
            state,
            now,
            password: "",
        }
    }

    pub fn with_password(mut self, password: &'a str) -> Self {
        self.password = password;
        self
    }
}

pub fn esc(text: &str) -> Cow<'_, str> {
    html_escape::encode_text(text)
}

fn attr(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

fn date(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

fn layout(current: Page, body: &str) -> String {
    let mut nav = String::new();
    for page in Page::NAV {
        let marker = if page == current { " aria-current=\"page\"" } else { "" };
        nav.push_str(&format!(
            "<a href=\"{}\"{}>{}</a>\n",
            page.path(),
            marker,
            page.label()
        ));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Seguridad Digital Comunitaria</title>\n</head>\n<body>\n\
         <header><h1>Seguridad Digital Comunitaria</h1>\
         <p>Plataforma educativa para ciberseguridad</p></header>\n\
         <nav>\n{nav}</nav>\n<main>\n{body}</main>\n\
         <footer><p>&copy; 2025 Seguridad Digital Comunitaria</p>\
         <p>Plataforma educativa para la prevención de ciberamenazas</p></footer>\n\
         </body>\n</html>\n"
    )
}

fn card(title: &str, content: &str) -> String {
    format!("<section class=\"card\"><h3>{title}</h3>{content}</section>\n")
}

fn notice(class: &str, message: &str) -> String {
    format!("<div class=\"{class}\">{}</div>\n", esc(message))
}

fn home(view: &View<'_>) -> String {
    let mut out = String::from(
        "<h1>Unidos por un Internet Seguro</h1>\n\
         <p>Plataforma educativa para la prevención de ciberamenazas</p>\n",
    );
    out.push_str(&card(
        "📚 Educación",
        "<p>Guías sobre Phishing, Grooming y más técnicas de ciberdelincuencia.</p>",
    ));
    out.push_str(&card(
        "🛡️ Prevención",
        "<p>Simuladores interactivos con situaciones reales de riesgo.</p>",
    ));
    out.push_str(&card(
        "📣 Denuncia",
        "<p>Sistema de reportes comunitarios para alertar sobre amenazas.</p>",
    ));

    out.push_str("<section id=\"reportes\">\n<h2>Centro de Reportes Ciudadanos</h2>\n");
    if let Some(message) = visible(&view.state.view.report_ack, view.now) {
        out.push_str(&notice("success", message));
    }
    out.push_str(
        "<form method=\"post\" action=\"/reports\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Título del reporte\" required>\n\
         <textarea name=\"description\" rows=\"5\" placeholder=\"Describe lo sucedido...\" required></textarea>\n\
         <button type=\"submit\">Enviar Reporte</button>\n</form>\n</section>\n",
    );

    let reports = view.state.reports.get();
    if !reports.is_empty() {
        out.push_str("<section>\n<h3>Reportes Recientes</h3>\n");
        for r in recent(reports) {
            out.push_str(&format!(
                "<article class=\"report\"><h4>{}</h4><time>{}</time><p>{}</p></article>\n",
                esc(&r.title),
                date(&r.date),
                esc(&r.description)
            ));
        }
        out.push_str("</section>\n");
    }
    out
}

fn quiz(runner: &QuizRunner) -> String {
    let quiz = runner.quiz();
    let mut out = format!(
        "<section class=\"quiz\">\n<h3>{}</h3>\n<div class=\"score\">{}/{} <span>{}%</span></div>\n",
        esc(&quiz.title),
        runner.score(),
        runner.total(),
        runner.percentage()
    );

    for (idx, q) in quiz.questions().iter().enumerate() {
        out.push_str("<article class=\"question\">\n");
        if let Some(platform) = q.platform {
            out.push_str(&format!("<span class=\"platform\">{platform}</span>\n"));
        }
        out.push_str(&format!("<p>{}. {}</p>\n", idx + 1, esc(&q.prompt)));

        match runner.answer_for(idx) {
            None => {
                for (opt_idx, option) in q.options.iter().enumerate() {
                    out.push_str(&format!(
                        "<form method=\"post\" action=\"/phishing/answer\">\
                         <input type=\"hidden\" name=\"question\" value=\"{idx}\">\
                         <input type=\"hidden\" name=\"option\" value=\"{opt_idx}\">\
                         <button type=\"submit\">{}</button></form>\n",
                        esc(&option.text)
                    ));
                }
            }
            Some(answer) => {
                out.push_str("<ul class=\"answered\">\n");
                for (opt_idx, option) in q.options.iter().enumerate() {
                    let class = if option.correct { "correct" } else { "incorrect" };
                    let chosen = if opt_idx == answer.option { " chosen" } else { "" };
                    out.push_str(&format!(
                        "<li class=\"{class}{chosen}\">{}<div class=\"feedback\">{}</div></li>\n",
                        esc(&option.text),
                        esc(&option.feedback)
                    ));
                }
                out.push_str("</ul>\n");
            }
        }
        out.push_str("</article>\n");
    }

    out.push_str(
        "<form method=\"post\" action=\"/phishing/reset\">\
         <button type=\"submit\">Reiniciar test</button></form>\n</section>\n",
    );
    out
}

fn phishing(view: &View<'_>) -> String {
    let mut out = String::from("<h1>Protección contra Phishing</h1>\n");
    out.push_str(&card(
        "¿Qué es el Phishing?",
        "<p>El phishing es cuando un atacante se hace pasar por una entidad confiable \
         (banco, red social) para robarte información personal.</p>",
    ));
    out.push_str(&card(
        "🎣 Señales de Alerta",
        "<ul><li>Urgencia excesiva (\"actúa ahora\")</li><li>Errores ortográficos</li>\
         <li>Enlaces sospechosos</li><li>Solicitudes de datos personales</li></ul>",
    ));
    out.push_str(&card(
        "🛡️ Cómo Protegerte",
        "<ul><li>Verifica el remitente</li><li>No hagas clic en links sospechosos</li>\
         <li>Usa autenticación 2FA</li><li>Contacta directamente a la empresa</li></ul>",
    ));
    out.push_str(&quiz(&view.state.phishing));
    out
}

fn strength_class(strength: Strength) -> &'static str {
    match strength {
        Strength::Empty => "meter-empty",
        Strength::Weak => "meter-weak",
        Strength::Fair => "meter-fair",
        Strength::Good => "meter-good",
        Strength::Strong => "meter-strong",
    }
}

fn security(view: &View<'_>) -> String {
    let evaluation = evaluate(view.password);
    let check = |ok: bool, label: &str| {
        let (class, mark) = if ok { ("ok", "✓") } else { ("missing", "✗") };
        format!("<li class=\"{class}\">{mark} {label}</li>\n")
    };

    let mut out = String::from(
        "<h1>Ciberseguridad Total</h1>\n<section>\n<h3>🔒 Probador de Contraseñas</h3>\n",
    );
    out.push_str(&format!(
        "<form method=\"post\" action=\"/security\">\
         <input type=\"password\" name=\"password\" value=\"{}\" placeholder=\"Escribe una contraseña...\">\
         <button type=\"submit\">Evaluar</button></form>\n",
        attr(view.password)
    ));
    out.push_str(&format!(
        "<div class=\"meter {}\" data-strength=\"{}\" style=\"width: {}%\"></div>\n<ul>\n",
        strength_class(evaluation.strength),
        evaluation.strength,
        evaluation.percent()
    ));
    out.push_str(&check(evaluation.checks.length, "Mínimo 8 caracteres"));
    out.push_str(&check(evaluation.checks.uppercase, "Una MAYÚSCULA"));
    out.push_str(&check(evaluation.checks.number, "Un número"));
    out.push_str(&check(evaluation.checks.special, "Un símbolo (!@#$)"));
    out.push_str("</ul>\n</section>\n");
    out
}

fn gaming() -> String {
    let mut out = String::from("<h1>Seguridad en Videojuegos</h1>\n");
    out.push_str(&card(
        "Protege tu Identidad Gamer",
        "<p>Los videojuegos son increíbles, pero también tienen riesgos. Aprende a \
         protegerte del doxing, estafas de trading y malware disfrazado.</p>",
    ));
    out
}

fn social() -> String {
    let mut out = String::from("<h1>Redes Sociales Seguras</h1>\n");
    out.push_str(&card(
        "Gestiona tu Privacidad",
        "<p>Configura correctamente tus redes sociales para proteger tu información \
         personal y reputación digital.</p>",
    ));
    out
}

fn counters(post: &Post) -> String {
    format!(
        "<span class=\"likes\">👍 {}</span> <span class=\"dislikes\">👎 {}</span>",
        post.likes, post.dislikes
    )
}

fn grooming(view: &View<'_>) -> String {
    let mut out = String::from(
        "<h1>Prevención de Grooming</h1>\n<p>Casos reales y alertas de la comunidad</p>\n\
         <a class=\"button\" href=\"/admin\">Publicar Historia</a>\n",
    );
    out.push_str(&card(
        "¿Qué es el Grooming?",
        "<p>El grooming es cuando un adulto construye confianza con un menor para obtener \
         beneficios ilegales. Es un proceso de \"preparación\" gradual.</p>",
    ));

    let posts = view.state.posts.get();
    out.push_str("<section class=\"posts\">\n");
    if posts.is_empty() {
        out.push_str("<p>No hay historias publicadas aún. Sé el primero en compartir.</p>\n");
    }
    for post in newest_first(posts) {
        out.push_str(&format!(
            "<article class=\"post\"><h3>{}</h3><p>{}...</p><div>{}</div>\
             <a href=\"/grooming/{}\">Ver detalles →</a></article>\n",
            esc(&post.title),
            esc(&excerpt(&post.body, EXCERPT_CHARS)),
            counters(post),
            post.id
        ));
    }
    out.push_str("</section>\n");

    out.push_str(&card(
        "📞 Ayuda Inmediata",
        "<ul><li><strong>Emergencias:</strong> 911</li>\
         <li><strong>Policía Cibernética:</strong> policia.cibernetica@gob.mx</li>\
         <li><strong>Denuncia Online:</strong> iwf.org.uk</li>\
         <li><strong>Línea de Ayuda:</strong> 800-123-4567</li></ul>",
    ));
    out
}

/// Detail view of one story with its vote buttons, or `None` for an unknown id.
pub fn render_post(view: &View<'_>, id: i64) -> Option<String> {
    let post = find(view.state.posts.get(), id)?;
    let cast = vote_for(view.state.votes.get(), id);

    let mut out = String::from("<a href=\"/grooming\">← Volver a Historias</a>\n<article class=\"post-detail\">\n");
    out.push_str(&format!(
        "<time>{}</time>\n<h1>{}</h1>\n<div class=\"body\" style=\"white-space: pre-wrap\">{}</div>\n",
        date(&post.created_at),
        esc(&post.title),
        esc(&post.body)
    ));

    for vote in [VoteType::Likes, VoteType::Dislikes] {
        let icon = match vote {
            VoteType::Likes => "👍",
            VoteType::Dislikes => "👎",
        };
        let selected = if cast == Some(vote) { " selected" } else { "" };
        let disabled = if cast.is_some() { " disabled" } else { "" };
        out.push_str(&format!(
            "<form method=\"post\" action=\"/grooming/{id}/vote/{vote}\">\
             <button type=\"submit\" class=\"vote {vote}{selected}\"{disabled}>{icon} {}</button></form>\n",
            post.count(vote)
        ));
    }
    out.push_str("</article>\n");
    Some(layout(Page::Grooming, &out))
}

fn admin(view: &View<'_>) -> String {
    let state = view.state;
    let mut out = String::from("<a href=\"/grooming\">← Volver al Blog</a>\n");

    if !state.is_authenticated() {
        out.push_str(
            "<section>\n<h2>Panel de Administrador</h2>\n\
             <p>Ingresa con las credenciales de administrador. \
             Demo: admin@seguridad.com / Admin123!</p>\n",
        );
        if let Some(error) = &state.view.login_error {
            out.push_str(&notice("error", error));
        }
        out.push_str(
            "<form method=\"post\" action=\"/admin/login\">\n\
             <input type=\"email\" name=\"email\" placeholder=\"Correo de administrador\" required>\n\
             <input type=\"password\" name=\"password\" placeholder=\"Contraseña\" required>\n\
             <button type=\"submit\">Ingresar</button>\n</form>\n</section>\n",
        );
        return out;
    }

    out.push_str(
        "<form method=\"post\" action=\"/admin/logout\">\
         <button type=\"submit\">Cerrar Sesión</button></form>\n\
         <section>\n<h2>Escribir Nueva Historia</h2>\n",
    );
    if let Some(message) = visible(&state.view.publish_ack, view.now) {
        out.push_str(&notice("success", message));
    }
    out.push_str(
        "<form method=\"post\" action=\"/admin/posts\">\n\
         <input type=\"text\" name=\"title\" placeholder=\"Título de la historia\" required>\n\
         <textarea name=\"body\" rows=\"10\" placeholder=\"Escribe la historia aquí...\" required></textarea>\n\
         <button type=\"submit\">Publicar Historia</button>\n</form>\n</section>\n",
    );

    let posts = state.posts.get();
    out.push_str(&format!(
        "<section>\n<h3>Historias Publicadas ({})</h3>\n",
        posts.len()
    ));
    for post in newest_first(posts) {
        out.push_str(&format!(
            "<article><h4>{}</h4><time>{}</time><div>{}</div></article>\n",
            esc(&post.title),
            date(&post.created_at),
            counters(post)
        ));
    }
    out.push_str("</section>\n");
    out
}
