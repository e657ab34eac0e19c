use crate::models::TrackerView;

pub fn render_index(view: &TrackerView) -> String {
    let initial = serde_json::to_string(view).unwrap_or_else(|_| "null".to_string());
    INDEX_HTML
        .replace("{{DAILY}}", &view.daily_ml.to_string())
        .replace("{{WEEKLY}}", &view.weekly_ml.to_string())
        .replace("{{MONTHLY}}", &view.monthly_ml.to_string())
        .replace("{{YEARLY}}", &view.yearly_ml.to_string())
        .replace("{{GOAL}}", &view.daily_goal_ml.to_string())
        .replace("{{GOAL_PERCENT}}", &format!("{:.0}", view.daily_goal_percent))
        .replace("{{BUCKET}}", &view.bucket_level_ml.to_string())
        .replace("{{FILL}}", &format!("{:.1}", view.bucket_fill_percent))
        .replace("{{HINT}}", &view.water_hint)
        .replace("{{WATER_DISABLED}}", if view.can_water { "" } else { "disabled" })
        .replace("{{UNDO_DISABLED}}", if view.can_undo { "" } else { "disabled" })
        .replace("{{GARDEN}}", &render_garden(view))
        .replace("{{INPUT}}", &view.input_default.to_string())
        .replace("{{INITIAL}}", &initial.replace("</", "<\\/"))
}

fn render_garden(view: &TrackerView) -> String {
    if let Some(message) = &view.garden_message {
        return format!(r#"<p id="garden-message">{message}</p>"#);
    }
    view.flowers
        .iter()
        .map(|flower| format!(r#"<span class="flower-unit" title="{}">{}</span>"#, flower.date, view.flower_icon))
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Water Garden</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eaf6fb;
      --bg-2: #b9e2f2;
      --ink: #22313a;
      --accent: #2f9fd0;
      --accent-2: #3f7d4e;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(34, 49, 58, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #dff1f7 60%, #f4fbfd 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(860px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    h2 {
      margin: 0 0 12px;
      font-size: 1.3rem;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5a6970;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(34, 49, 58, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d8a90;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .entry {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
    }

    .entry input {
      font: inherit;
      font-size: 1.1rem;
      width: 140px;
      padding: 14px 16px;
      border-radius: 14px;
      border: 1px solid rgba(34, 49, 58, 0.2);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      color: white;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    button:disabled {
      opacity: 0.45;
      cursor: not-allowed;
    }

    .btn-add {
      background: var(--accent);
    }

    .btn-undo {
      background: #6b7a80;
    }

    .btn-water {
      background: var(--accent-2);
    }

    .game {
      display: grid;
      grid-template-columns: 120px 1fr;
      gap: 24px;
      align-items: end;
    }

    .bucket {
      position: relative;
      height: 160px;
      border: 3px solid var(--ink);
      border-top: none;
      border-radius: 0 0 22px 22px;
      overflow: hidden;
      background: white;
    }

    #water-level {
      position: absolute;
      bottom: 0;
      width: 100%;
      background: linear-gradient(180deg, #7cc8e8, var(--accent));
      transition: height 400ms ease;
    }

    .garden {
      min-height: 64px;
      font-size: 2rem;
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    #garden-message {
      font-size: 1rem;
      color: #6f7c82;
    }

    .hint {
      margin: 0;
      color: #6f7c82;
      font-size: 0.9rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Water Garden</h1>
      <p class="subtitle">Log every glass. Each {{GOAL}} ml day is a good day, every 1000 ml grows a flower.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Today</span>
        <span id="daily" class="value">{{DAILY}} ml</span>
        <span id="goal" class="hint">{{GOAL_PERCENT}}% of the {{GOAL}} ml goal</span>
      </div>
      <div class="stat">
        <span class="label">This week</span>
        <span id="weekly" class="value">{{WEEKLY}}</span>
      </div>
      <div class="stat">
        <span class="label">This month</span>
        <span id="monthly" class="value">{{MONTHLY}}</span>
      </div>
      <div class="stat">
        <span class="label">This year</span>
        <span id="yearly" class="value">{{YEARLY}}</span>
      </div>
    </section>

    <section>
      <form id="intake-form" class="entry" method="post" action="/intake">
        <input id="amount" name="amount" type="number" min="1" step="1" value="{{INPUT}}" />
        <button class="btn-add" type="submit">Record</button>
      </form>
      <form id="undo-form" class="entry" method="post" action="/undo">
        <button id="undo-btn" class="btn-undo" type="submit" {{UNDO_DISABLED}}>Undo last entry</button>
      </form>
    </section>

    <section class="game">
      <div class="bucket" title="{{BUCKET}} ml">
        <div id="water-level" style="height: {{FILL}}%"></div>
      </div>
      <div>
        <h2>Bucket: <span id="bucket">{{BUCKET}}</span> ml</h2>
        <form id="flower-form" method="post" action="/flower">
          <button id="water-btn" class="btn-water" type="submit" title="{{HINT}}" {{WATER_DISABLED}}>Water the flower</button>
        </form>
        <p id="water-hint" class="hint">{{HINT}}</p>
      </div>
    </section>

    <section>
      <h2>Garden</h2>
      <div id="garden" class="garden">{{GARDEN}}</div>
    </section>
  </main>

  <script>
    const amountEl = document.getElementById('amount');
    const dailyEl = document.getElementById('daily');
    const weeklyEl = document.getElementById('weekly');
    const monthlyEl = document.getElementById('monthly');
    const yearlyEl = document.getElementById('yearly');
    const bucketEl = document.getElementById('bucket');
    const levelEl = document.getElementById('water-level');
    const waterBtn = document.getElementById('water-btn');
    const hintEl = document.getElementById('water-hint');
    const goalEl = document.getElementById('goal');
    const undoBtn = document.getElementById('undo-btn');
    const gardenEl = document.getElementById('garden');

    const renderGarden = (view) => {
      gardenEl.innerHTML = '';
      if (view.garden_message) {
        const message = document.createElement('p');
        message.id = 'garden-message';
        message.textContent = view.garden_message;
        gardenEl.appendChild(message);
        return;
      }
      view.flowers.forEach((flower) => {
        const unit = document.createElement('span');
        unit.className = 'flower-unit';
        unit.title = flower.date;
        unit.textContent = view.flower_icon;
        gardenEl.appendChild(unit);
      });
    };

    const render = (view) => {
      dailyEl.textContent = `${view.daily_ml} ml`;
      weeklyEl.textContent = view.weekly_ml;
      monthlyEl.textContent = view.monthly_ml;
      yearlyEl.textContent = view.yearly_ml;
      bucketEl.textContent = view.bucket_level_ml;
      levelEl.style.height = `${view.bucket_fill_percent}%`;
      waterBtn.disabled = !view.can_water;
      waterBtn.title = view.water_hint;
      hintEl.textContent = view.water_hint;
      goalEl.textContent = `${Math.round(view.daily_goal_percent)}% of the ${view.daily_goal_ml} ml goal`;
      undoBtn.disabled = !view.can_undo;
      renderGarden(view);
    };

    const post = async (path, body) => {
      const res = await fetch(path, {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: body === undefined ? undefined : JSON.stringify(body)
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      const data = await res.json();
      render(data.view);
      if (data.message) {
        alert(data.message);
      }
      return data;
    };

    const report = (err) => alert(err.message);

    document.getElementById('intake-form').addEventListener('submit', (event) => {
      event.preventDefault();
      post('/api/intake', { amount: amountEl.value })
        .then((data) => {
          amountEl.value = data.view.input_default;
        })
        .catch(report);
    });

    amountEl.addEventListener('keydown', (event) => {
      if (event.key === 'Enter') {
        event.preventDefault();
        document.getElementById('intake-form').requestSubmit();
      }
    });

    document.getElementById('undo-form').addEventListener('submit', (event) => {
      event.preventDefault();
      post('/api/undo').catch(report);
    });

    document.getElementById('flower-form').addEventListener('submit', (event) => {
      event.preventDefault();
      post('/api/flower').catch(report);
    });

    render({{INITIAL}});
  </script>
</body>
</html>
"#;
