use crate::models::workflow_result::WorkflowResult;
use crate::routes::app_state::PipelineInfo;

const PLACEHOLDER: &str = "Subject: Order Issue\n\nHello,\nMy package arrived damaged...";

/// What the results column shows on this render.
pub enum Outcome<'a> {
    Idle,
    Ready(&'a WorkflowResult),
    Failed(String),
}

pub struct PageView<'a> {
    pub pipelines: &'a PipelineInfo,
    pub email: &'a str,
    pub notice: Option<&'a str>,
    pub outcome: Outcome<'a>,
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Email Reply Assistant</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<h1 class="main-header">Email Reply Assistant</h1>
<p class="tagline"><strong>Classify &rarr; Generate Reply &rarr; Translate to Chinese</strong></p>
{}
<hr>
<footer>Powered by actix-web + hosted transformers pipelines</footer>
</body>
</html>
"#,
        body
    )
}

fn sidebar(pipelines: &PipelineInfo) -> String {
    format!(
        r#"<aside class="sidebar">
<h2>Pipeline Status</h2>
<p class="ok"><strong>Pipeline 1</strong>: <code>{}</code></p>
<p class="ok"><strong>Pipeline 2</strong>: <code>{}</code> ({})</p>
<p class="ok"><strong>Pipeline 3</strong>: <code>{}</code></p>
<p class="info">Paste email &rarr; Process &rarr; Copy replies!</p>
</aside>"#,
        escape_html(&pipelines.classifier),
        escape_html(&pipelines.generator),
        escape_html(&pipelines.generator_backend),
        escape_html(&pipelines.translator),
    )
}

fn input_column(email: &str, notice: Option<&str>) -> String {
    let mut html = String::from("<section class=\"input\">\n<h2>Input Email</h2>\n");
    if let Some(notice) = notice {
        html.push_str(&format!("<p class=\"error\">{}</p>\n", escape_html(notice)));
    }
    html.push_str(&format!(
        r#"<form method="post" action="/process">
<textarea name="email" rows="12" placeholder="{}">{}</textarea>
<button type="submit" class="primary">PROCESS EMAIL</button>
</form>
<form method="post" action="/clear">
<button type="submit">CLEAR</button>
</form>
</section>"#,
        escape_html(PLACEHOLDER),
        escape_html(email)
    ));
    html
}

fn results_column(result: &WorkflowResult) -> String {
    let mut html = String::from("<section class=\"results\">\n");
    html.push_str(&format!(
        r#"<div class="pipeline-card">
<h3>Pipeline 1: Email Classifier</h3>
<div class="metrics">
<div class="metric-card"><h4>Tag</h4><p class="metric">{}</p></div>
<div class="metric-card"><h4>Confidence</h4><p class="metric">{}</p></div>
</div>
</div>
<div class="pipeline-card">
<h3>Pipeline 2: English Reply</h3>
<textarea class="reply" rows="7" readonly>{}</textarea>
</div>
<div class="pipeline-card">
<h3>Pipeline 3: Chinese Translation</h3>
<textarea class="reply" rows="7" readonly>{}</textarea>
</div>
<div class="downloads">
"#,
        escape_html(&result.classification.label),
        result.classification.confidence_percent(),
        escape_html(&result.reply_en),
        escape_html(&result.reply_zh),
    ));
    let [en, zh] = result.downloads();
    for (artifact, caption) in [(en, "Download English"), (zh, "Download Chinese")] {
        html.push_str(&format!(
            "<a class=\"download\" href=\"{}\" download=\"{}\">{}</a>\n",
            artifact.data_uri(),
            artifact.file_name,
            caption
        ));
    }
    html.push_str(&format!(
        "</div>\n<p class=\"meta\">Generated {}</p>\n</section>",
        result.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html
}

pub fn render(view: &PageView) -> String {
    let results = match &view.outcome {
        Outcome::Idle => String::from(
            "<section class=\"results\">\n<div class=\"pipeline-card\"><p class=\"info\">Paste your email above and click PROCESS</p></div>\n</section>",
        ),
        Outcome::Ready(result) => results_column(result),
        Outcome::Failed(message) => format!(
            "<section class=\"results\">\n<div class=\"pipeline-card\"><p class=\"error\">{}</p></div>\n</section>",
            escape_html(message)
        ),
    };
    layout(&format!(
        "{}\n<main class=\"columns\">\n{}\n{}\n</main>",
        sidebar(view.pipelines),
        input_column(view.email, view.notice),
        results
    ))
}

/// Page shown when the pipelines could not be loaded at all.
pub fn render_fatal(message: &str) -> String {
    layout(&format!("<p class=\"error\">{}</p>", escape_html(message)))
}
