use crate::aggregate::{DaySummary, RecordView, WeekSummary};
use crate::notice::Notice;
use crate::store::{PendingDeletion, WeeklyStore};
use crate::time::format_minutes;

pub fn render_index(store: &WeeklyStore, flash: Option<&Notice>) -> String {
    let summary = WeekSummary::from_state(store.state());
    let days: String = summary.days.iter().map(render_day).collect();

    INDEX_HTML
        .replace("{{DAYS}}", &days)
        .replace("{{WEEK_TOTAL}}", &summary.total)
        .replace("{{PROGRESS_WIDTH}}", &format!("{:.1}", summary.progress.percent))
        .replace("{{PROGRESS_COLOR}}", summary.progress.tier.color())
        .replace("{{PROGRESS_LABEL}}", &summary.progress.label)
        .replace("{{DELETE_DIALOG}}", &render_delete_dialog(store.pending()))
        .replace("{{TOAST}}", &flash.map(render_toast).unwrap_or_default())
}

fn render_day(day: &DaySummary) -> String {
    let records: String = day
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| render_record(day, index, record))
        .collect();

    format!(
        r#"<section class="day" style="--day: {color}">
      <header><span class="name">{label}</span><span class="total">{total}</span></header>
      {records}
      <form method="post" action="/records/add">
        <input type="hidden" name="day" value="{key}" />
        <button class="btn-add" type="submit">+ Add record</button>
      </form>
    </section>
"#,
        color = day.day.color(),
        label = day.label,
        total = day.total,
        key = day.day.key(),
    )
}

fn render_record(day: &DaySummary, index: usize, record: &RecordView) -> String {
    let key = day.day.key();
    let exit_disabled = if record.entrada.is_empty() { " disabled" } else { "" };
    let duration = if record.minutes != 0 {
        format_minutes(record.minutes)
    } else {
        String::new()
    };

    format!(
        r#"<div class="record">
        <div class="record-head">
          <strong>Record {number}</strong>
          <form method="post" action="/records/delete">
            <input type="hidden" name="day" value="{key}" />
            <input type="hidden" name="index" value="{index}" />
            <button class="btn-delete" type="submit" title="Delete record">&#128465;</button>
          </form>
        </div>
        <form method="post" action="/records/update">
          <input type="hidden" name="day" value="{key}" />
          <input type="hidden" name="index" value="{index}" />
          <input type="hidden" name="field" value="entrada" />
          <label>Entry <input type="time" name="value" value="{entry}" onchange="this.form.submit()" /></label>
        </form>
        <form method="post" action="/records/update">
          <input type="hidden" name="day" value="{key}" />
          <input type="hidden" name="index" value="{index}" />
          <input type="hidden" name="field" value="salida" />
          <label>Exit <input type="time" name="value" value="{exit}" onchange="this.form.submit()"{exit_disabled} /></label>
        </form>
        <div class="duration"><strong>Duration</strong><span>{duration}</span></div>
      </div>
"#,
        number = index + 1,
        entry = record.entrada,
        exit = record.salida,
    )
}

fn render_delete_dialog(pending: PendingDeletion) -> String {
    let PendingDeletion::Pending { day, index } = pending else {
        return String::new();
    };

    format!(
        r#"<dialog class="confirm" open>
    <p>Delete the hours of {label}, record {number}?</p>
    <div class="dialog-actions">
      <form method="post" action="/records/delete/cancel"><button type="submit">Cancel</button></form>
      <form method="post" action="/records/delete/confirm"><button class="danger" type="submit">Delete</button></form>
    </div>
  </dialog>"#,
        label = day.label(),
        number = index + 1,
    )
}

fn render_toast(notice: &Notice) -> String {
    format!(
        r#"<div class="toast {severity}" data-delay="{delay}"><strong>{title}</strong><br />{message}</div>"#,
        severity = notice.severity.as_str(),
        delay = notice.display_ms,
        title = notice.title,
        message = notice.message,
    )
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Control horario</title>
  <style>
    :root {
      --ink: #24262b;
      --muted: #6d6a66;
      --card: #ffffff;
      --shadow: 0 18px 40px rgba(36, 38, 43, 0.14);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, #eef2f7, #f9f6ef);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    h1 {
      text-align: center;
      margin: 0 0 24px;
    }

    .week {
      display: flex;
      flex-wrap: wrap;
      justify-content: center;
      gap: 20px;
    }

    .day {
      width: 280px;
      background: var(--card);
      border-radius: 15px;
      box-shadow: var(--shadow);
      overflow: hidden;
      padding-bottom: 14px;
    }

    .day header {
      background: var(--day);
      color: white;
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px 16px;
    }

    .day header .name {
      font-size: 1.4rem;
    }

    .day header .total {
      color: var(--ink);
      font-weight: 700;
      font-size: 1.15rem;
    }

    .record {
      margin: 12px 14px 0;
      padding: 10px;
      border: 1px solid var(--day);
      border-radius: 8px;
      display: grid;
      gap: 6px;
    }

    .record-head,
    .duration {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .record label {
      display: grid;
      gap: 4px;
      color: var(--muted);
    }

    .record input[type="time"] {
      padding: 6px 8px;
      border: 1px solid #cfd3da;
      border-radius: 6px;
      font-size: 1rem;
    }

    button {
      cursor: pointer;
      border-radius: 8px;
      border: 1px solid #cfd3da;
      background: white;
      padding: 6px 12px;
      font-size: 0.95rem;
    }

    .btn-add {
      margin: 12px 14px 0;
      width: calc(100% - 28px);
      border-color: #2f6fed;
      color: #2f6fed;
    }

    .btn-delete {
      border-color: #d64545;
      padding: 2px 8px;
    }

    .summary {
      max-width: 900px;
      margin: 32px auto 0;
      display: grid;
      gap: 14px;
    }

    .summary .totals {
      display: flex;
      justify-content: space-between;
      align-items: center;
      font-size: 1.2rem;
    }

    .progress {
      height: 28px;
      background: #e3e6eb;
      border-radius: 14px;
      overflow: hidden;
    }

    .progress .bar {
      height: 100%;
      color: white;
      font-weight: 700;
      display: flex;
      align-items: center;
      justify-content: center;
      white-space: nowrap;
      transition: width 300ms ease;
    }

    .danger {
      background: #d64545;
      border-color: #d64545;
      color: white;
    }

    dialog.confirm {
      border: none;
      border-radius: 12px;
      box-shadow: var(--shadow);
      padding: 20px 24px;
    }

    .dialog-actions {
      display: flex;
      justify-content: flex-end;
      gap: 10px;
    }

    .toast {
      position: fixed;
      right: 20px;
      bottom: 20px;
      max-width: 340px;
      padding: 12px 16px;
      border-radius: 10px;
      box-shadow: var(--shadow);
      transition: opacity 300ms ease;
    }

    .toast.success { background: #2f9e5b; color: white; }
    .toast.warning { background: #f2c14e; color: var(--ink); }
    .toast.danger { background: #d64545; color: white; }
    .toast.info { background: #dceefb; color: var(--ink); }
  </style>
</head>
<body>
  <h1>Control horario semanal</h1>

  <main class="week">
    {{DAYS}}
  </main>

  <section class="summary">
    <div class="totals">
      <span>Total hours this week: <strong>{{WEEK_TOTAL}}</strong></span>
      <form method="post" action="/week/clear" onsubmit="return confirm('Delete all the hours of this week?')">
        <button class="danger" type="submit">Clear week</button>
      </form>
    </div>
    <div class="progress">
      <div class="bar" style="width: {{PROGRESS_WIDTH}}%; background: {{PROGRESS_COLOR}}">{{PROGRESS_LABEL}}</div>
    </div>
  </section>

  {{DELETE_DIALOG}}
  {{TOAST}}

  <script>
    document.querySelectorAll('.toast').forEach((toast) => {
      const delay = Number(toast.dataset.delay) || 3500;
      setTimeout(() => {
        toast.style.opacity = '0';
        setTimeout(() => toast.remove(), 300);
      }, delay);
    });
  </script>
</body>
</html>
"#;
