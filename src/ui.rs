use crate::config::CardConfig;
use crate::models::Snapshot;

pub fn render_index(config: &CardConfig, snapshot: &Snapshot) -> String {
    let initial = serde_json::to_string(snapshot)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");
    // Operator text goes in last and has `{` escaped, so it never forms a placeholder.
    INDEX_HTML
        .replace("{{CANDLES}}", &candle_row(snapshot))
        .replace("{{BALLOONS}}", &balloon_row(snapshot))
        .replace("{{CELEBRATE_DISABLED}}", if snapshot.celebrating { "disabled" } else { "" })
        .replace("{{STATE}}", &initial)
        .replace("{{TITLE}}", &escape_html(&config.title))
        .replace(
            "{{DATE}}",
            &escape_html(&config.birthday_label().unwrap_or_default()),
        )
        .replace("{{NAME}}", &escape_html(&config.recipient))
}

const CANDLE_COLORS: [&str; 5] = ["#FF6B6B", "#4ECDC4", "#45B7D1", "#FFA07A", "#98D8C8"];

fn candle_row(snapshot: &Snapshot) -> String {
    snapshot
        .candles
        .iter()
        .enumerate()
        .map(|(index, lit)| {
            let color = CANDLE_COLORS[index % CANDLE_COLORS.len()];
            let class = if *lit { "candle lit" } else { "candle" };
            format!(
                r#"<button class="{class}" data-index="{index}" style="--tint: {color}" aria-label="Light candle {n}">&#127874;</button>"#,
                n = index + 1
            )
        })
        .collect()
}

fn balloon_row(snapshot: &Snapshot) -> String {
    snapshot
        .balloons
        .iter()
        .enumerate()
        .map(|(index, popped)| {
            let color = CANDLE_COLORS[index % CANDLE_COLORS.len()];
            let class = if *popped { "balloon popped" } else { "balloon" };
            format!(
                r#"<button class="{class}" data-index="{index}" style="--tint: {color}" aria-label="Pop balloon {n}">&#127880;</button>"#,
                n = index + 1
            )
        })
        .collect()
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
            '{' => out.push_str("&#123;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: #ffffff;
      color: #111111;
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 16px;
    }

    .card {
      width: min(448px, 100%);
      border: 2px solid #000000;
      border-radius: 12px;
      padding: 28px 24px;
      display: grid;
      gap: 24px;
      text-align: center;
      animation: rise 500ms ease;
      transition: box-shadow 300ms ease;
    }

    .card:hover {
      box-shadow: 0 20px 40px rgba(0, 0, 0, 0.15);
    }

    h1 {
      margin: 0;
      font-size: 2.25rem;
    }

    .name {
      margin: 4px 0 0;
      font-size: 1.5rem;
      font-weight: 600;
      color: #4b5563;
    }

    .date {
      margin: 4px 0 0;
      color: #6b7280;
    }

    h3 {
      margin: 0 0 8px;
      font-size: 1.1rem;
    }

    .row {
      display: flex;
      justify-content: center;
      gap: 8px;
    }

    .candle,
    .balloon {
      border: none;
      background: none;
      font-size: 2rem;
      cursor: pointer;
      transition: transform 300ms ease, filter 300ms ease, opacity 300ms ease;
    }

    .candle:hover,
    .balloon:hover {
      transform: scale(1.1);
    }

    .candle {
      filter: grayscale(1) opacity(0.35);
    }

    .candle.lit {
      filter: drop-shadow(0 0 6px var(--tint));
      animation: pop-in 500ms ease;
    }

    .balloon {
      filter: drop-shadow(0 0 4px var(--tint));
    }

    .balloon.popped {
      transform: scale(0);
      opacity: 0.2;
    }

    #celebrate {
      justify-self: center;
      border: none;
      border-radius: 8px;
      background: #000000;
      color: #ffffff;
      padding: 10px 20px;
      font-size: 1rem;
      cursor: pointer;
    }

    #celebrate:hover {
      background: #1f2937;
    }

    #celebrate:disabled {
      opacity: 0.5;
      cursor: default;
    }

    #confetti {
      position: fixed;
      inset: 0;
      pointer-events: none;
    }

    @keyframes rise {
      from { transform: scale(0.9); opacity: 0; }
      to { transform: scale(1); opacity: 1; }
    }

    @keyframes pop-in {
      from { transform: scale(0); }
      to { transform: scale(1); }
    }
  </style>
</head>
<body>
  <main class="card">
    <header>
      <h1>{{TITLE}}</h1>
      <p class="name">{{NAME}}</p>
      <p class="date">{{DATE}}</p>
    </header>
    <section>
      <h3>Light the candles:</h3>
      <div class="row" id="candles">{{CANDLES}}</div>
    </section>
    <section>
      <h3>Pop the balloons:</h3>
      <div class="row" id="balloons">{{BALLOONS}}</div>
    </section>
    <button id="celebrate" {{CELEBRATE_DISABLED}}>Celebrate! &#127873;</button>
  </main>
  <canvas id="confetti" hidden></canvas>

  <script>
    const candleEls = Array.from(document.querySelectorAll('#candles .candle'));
    const balloonEls = Array.from(document.querySelectorAll('#balloons .balloon'));
    const celebrateEl = document.getElementById('celebrate');
    const canvas = document.getElementById('confetti');
    const ctx = canvas.getContext('2d');

    let confetti = null;

    const post = async (path, body) => {
      const options = { method: 'POST' };
      if (body) {
        options.headers = { 'Content-Type': 'application/json' };
        options.body = JSON.stringify(body);
      }
      const response = await fetch(path, options);
      if (response.ok) {
        render(await response.json());
      }
    };

    const render = (state) => {
      candleEls.forEach((el, index) => el.classList.toggle('lit', !!state.candles[index]));
      balloonEls.forEach((el, index) => el.classList.toggle('popped', !!state.balloons[index]));
      celebrateEl.disabled = state.celebrating;
      canvas.width = state.confetti.width || window.innerWidth;
      canvas.height = state.confetti.height || window.innerHeight;
      if (state.confetti.visible && !confetti) {
        startConfetti(state.confetti);
      }
    };

    const startConfetti = (overlay) => {
      canvas.hidden = false;
      const pieces = Array.from({ length: overlay.pieces }, () => ({
        x: Math.random() * canvas.width,
        y: -Math.random() * canvas.height,
        vx: (Math.random() - 0.5) * 4,
        vy: 2 + Math.random() * 4,
        spin: Math.random() * Math.PI,
        size: 6 + Math.random() * 6,
        color: overlay.colors[Math.floor(Math.random() * overlay.colors.length)],
      }));
      confetti = { pieces, recycle: overlay.recycle };

      const frame = () => {
        ctx.clearRect(0, 0, canvas.width, canvas.height);
        let alive = 0;
        for (const piece of confetti.pieces) {
          piece.x += piece.vx;
          piece.y += piece.vy;
          piece.vy += 0.05;
          piece.spin += 0.1;
          if (piece.y > canvas.height) {
            if (!confetti.recycle) {
              continue;
            }
            piece.y = -piece.size;
          }
          alive += 1;
          ctx.save();
          ctx.translate(piece.x, piece.y);
          ctx.rotate(piece.spin);
          ctx.fillStyle = piece.color;
          ctx.fillRect(-piece.size / 2, -piece.size / 4, piece.size, piece.size / 2);
          ctx.restore();
        }
        if (alive > 0) {
          requestAnimationFrame(frame);
        }
      };
      requestAnimationFrame(frame);
    };

    candleEls.forEach((el) => {
      el.addEventListener('click', () => post(`/api/candles/${el.dataset.index}`));
    });

    balloonEls.forEach((el) => {
      el.addEventListener('click', () => post(`/api/balloons/${el.dataset.index}`));
    });

    celebrateEl.addEventListener('click', () => {
      celebrateEl.disabled = true;
      post('/api/celebrate');
    });

    let resizeFrame = null;
    const handleResize = () => {
      if (resizeFrame) {
        return;
      }
      resizeFrame = requestAnimationFrame(() => {
        resizeFrame = null;
        post('/api/viewport', { width: window.innerWidth, height: window.innerHeight });
      });
    };

    const events = new EventSource('/api/events');
    events.addEventListener('snapshot', (event) => render(JSON.parse(event.data)));

    window.addEventListener('resize', handleResize);
    window.addEventListener('pagehide', () => {
      window.removeEventListener('resize', handleResize);
      events.close();
    });

    render({{STATE}});
    handleResize();
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::celebration::CelebrationState;
    use crate::models::Viewport;

    #[test]
    fn renders_header_and_rows() {
        let mut state = CelebrationState::default();
        state.light_candle(0).unwrap();
        let snapshot = Snapshot::capture(&state, Viewport::default());
        let html = render_index(&CardConfig::default(), &snapshot);

        assert!(html.contains("<h1>Happy 20th Birthday!</h1>"));
        assert!(html.contains("Hashir Khan"));
        assert!(html.contains("August 7th"));
        assert_eq!(html.matches(r#"class="candle lit""#).count(), 1);
        assert_eq!(html.matches(r#"class="candle""#).count(), 4);
        assert_eq!(html.matches(r#"class="balloon""#).count(), 5);
        assert!(!html.contains("{{"));
    }

    #[test]
    fn escapes_configured_text() {
        let config = CardConfig {
            recipient: "<b>Ada</b>".to_string(),
            ..CardConfig::default()
        };
        let snapshot = Snapshot::capture(&CelebrationState::default(), Viewport::default());
        let html = render_index(&config, &snapshot);
        assert!(html.contains("&lt;b&gt;Ada&lt;/b&gt;"));
        assert!(!html.contains("<b>Ada</b>"));
    }

    #[test]
    fn configured_text_is_not_expanded_as_a_placeholder() {
        let config = CardConfig {
            title: "{{NAME}}".to_string(),
            recipient: "{{CANDLES}}".to_string(),
            ..CardConfig::default()
        };
        let snapshot = Snapshot::capture(&CelebrationState::default(), Viewport::default());
        let html = render_index(&config, &snapshot);

        assert_eq!(html.matches(r#"class="candle""#).count(), 5);
        assert!(html.contains(r#"<h1>&#123;&#123;NAME}}</h1>"#));
        assert!(html.contains(r#"<p class="name">&#123;&#123;CANDLES}}</p>"#));
    }

    #[test]
    fn celebrate_button_disabled_while_celebrating() {
        let mut state = CelebrationState::default();
        state.begin_celebration().unwrap();
        let snapshot = Snapshot::capture(&state, Viewport::default());
        let html = render_index(&CardConfig::default(), &snapshot);
        assert!(html.contains(r#"<button id="celebrate" disabled>"#));
    }
}
