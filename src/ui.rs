use crate::models::{Column, DefaultsResponse, FLAG_SENTINEL, FieldKind, TableView};

pub fn render_index(defaults: &DefaultsResponse, table: &TableView, error: Option<&str>) -> String {
    let status = match error {
        Some(message) => format!(r#"<p class="status error">{}</p>"#, escape_html(message)),
        None => String::new(),
    };

    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{STATUS}}", &status)
        .replace("{{DATE}}", &escape_html(&defaults.date))
        .replace("{{DAY_OF_CYCLE}}", &defaults.day_of_cycle.to_string())
        .replace("{{SEX}}", &render_sex_select())
        .replace("{{SYMPTOMS}}", &render_symptom_fields())
        .replace("{{OVULATION}}", &render_field(Column::PresumedOvulation, "presumed_ovulation"))
        .replace("{{PREGNANCY_TEST}}", &render_field(Column::PregnancyTest, "pregnancy_test"))
        .replace("{{TABLE}}", &render_table(table))
}

pub fn render_cycles(table: &TableView) -> String {
    CYCLES_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{TABLE}}", &render_table(table))
}

/// Disabled until the toggle is checked, so an untouched select is never submitted.
fn render_sex_select() -> String {
    let FieldKind::Choice(options) = Column::Sex.kind() else {
        unreachable!("Sex is a choice column");
    };
    format!(
        r#"<select id="sex" name="sex" disabled>{}</select>"#,
        render_options(options, None, Some("Other"))
    )
}

fn render_symptom_fields() -> String {
    const FIELDS: [(Column, &str); 7] = [
        (Column::Bleeding, "bleeding"),
        (Column::Fluid, "fluid"),
        (Column::Cramps, "cramps"),
        (Column::Acne, "acne"),
        (Column::StressLevel, "stress_level"),
        (Column::Mood, "mood"),
        (Column::Exercise, "exercise"),
    ];

    FIELDS
        .iter()
        .map(|&(column, id)| render_field(column, id))
        .collect()
}

fn render_field(column: Column, id: &str) -> String {
    let label = column.name();
    match column.kind() {
        FieldKind::Scale { max } => format!(
            r#"<label for="{id}">{label}</label>
        <input id="{id}" name="{id}" type="range" min="0" max="{max}" step="1" value="0" />"#
        ),
        FieldKind::Choice(options) => format!(
            r#"<label for="{id}">{label}</label>
        <select id="{id}" name="{id}">{}</select>"#,
            render_options(options, Some("Select"), None)
        ),
        FieldKind::Flag => format!(
            r#"<label><input name="{id}" type="checkbox" value="{FLAG_SENTINEL}" /> {label}</label>"#
        ),
        FieldKind::Date | FieldKind::Integer | FieldKind::Text => format!(
            r#"<label for="{id}">{label}</label>
        <input id="{id}" name="{id}" type="text" />"#
        ),
    }
}

fn render_options(options: &[&str], placeholder: Option<&str>, selected: Option<&str>) -> String {
    let mut out = placeholder
        .map(|text| format!(r#"<option value="">{text}</option>"#))
        .unwrap_or_default();
    for &option in options {
        let attr = if selected == Some(option) { " selected" } else { "" };
        out.push_str(&format!(r#"<option value="{option}"{attr}>{option}</option>"#));
    }
    out
}

fn render_table(table: &TableView) -> String {
    let mut out = String::from("<table><thead><tr>");
    for column in &table.columns {
        out.push_str(&format!("<th>{}</th>", escape_html(column)));
    }
    out.push_str("</tr></thead><tbody>");

    if table.rows.is_empty() {
        out.push_str(&format!(
            r#"<tr><td class="empty" colspan="{}">No entries yet</td></tr>"#,
            table.columns.len()
        ));
    }
    for row in &table.rows {
        out.push_str("<tr>");
        for cell in row {
            out.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table>");
    out
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
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

const STYLE: &str = r#"
    :root {
      --bg-1: #f8f3e6;
      --ink: #2b2a28;
      --accent: #c2415d;
      --muted: #5f5c57;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: linear-gradient(135deg, var(--bg-1), #fbe4e8 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1100px, 100%);
      margin: 0 auto;
      background: var(--card);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    fieldset {
      border: 1px solid #ccc;
      border-radius: 6px;
      padding: 12px;
      display: grid;
      gap: 8px;
    }

    input[type="text"], select {
      width: 100%;
      padding: 6px;
    }

    .actions {
      display: flex;
      gap: 10px;
    }

    button, .button {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      background: var(--accent);
      color: #fff;
      font-size: 1rem;
      text-decoration: none;
      cursor: pointer;
    }

    .status.error {
      color: #b00020;
      font-weight: 600;
    }

    .table-wrap {
      overflow-x: auto;
    }

    table {
      border-collapse: collapse;
      width: 100%;
    }

    th, td {
      border-bottom: 1px solid #e3dcd2;
      padding: 6px 8px;
      text-align: left;
      white-space: nowrap;
    }

    td.empty {
      color: var(--muted);
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Cycle Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Cycle Tracker</h1>
      <h3>Insert Data</h3>
    </header>
    {{STATUS}}
    <form method="post" action="/entries">
      <fieldset>
        <label for="date">Date (DD-MM-YYYY)</label>
        <input id="date" name="date" type="text" value="{{DATE}}" placeholder="Enter date" />
        <label for="day_of_cycle">Day of Cycle</label>
        <input id="day_of_cycle" name="day_of_cycle" type="text" inputmode="numeric" value="{{DAY_OF_CYCLE}}" />
      </fieldset>
      <fieldset>
        <label for="note">Note</label>
        <input id="note" name="note" type="text" placeholder="Enter note" />
      </fieldset>
      <fieldset>
        <label><input id="sex_toggle" type="checkbox" /> Enable Sex Selection</label>
        {{SEX}}
        {{SYMPTOMS}}
      </fieldset>
      <fieldset>
        <label for="sleep_duration">Sleep Duration</label>
        <input id="sleep_duration" name="sleep_duration" type="text" placeholder="Enter sleep duration" />
        <label for="weight">Weight</label>
        <input id="weight" name="weight" type="text" placeholder="Enter weight" />
      </fieldset>
      <fieldset>
        {{OVULATION}}
        {{PREGNANCY_TEST}}
      </fieldset>
      <div class="actions">
        <button type="submit" name="clicks" value="1">Save Data</button>
        <a class="button" href="/cycles">Cycles</a>
      </div>
    </form>

    <h2>Cycle Data</h2>
    <div class="table-wrap">{{TABLE}}</div>
  </main>
  <script>
    const sexToggle = document.getElementById('sex_toggle');
    const sexSelect = document.getElementById('sex');
    sexToggle.addEventListener('change', () => {
      sexSelect.disabled = !sexToggle.checked;
    });
  </script>
</body>
</html>
"#;

const CYCLES_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Cycles</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Cycles</h1>
      <a class="button" href="/">Back</a>
    </header>
    <div class="table-wrap">{{TABLE}}</div>
  </main>
</body>
</html>
"#;
