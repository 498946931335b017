//! HTML pages for the `/data` browser.
//!
//! The viewer page renders the first item of a directory; switching items
//! happens in the browser through `/media_context`.

use axum::http::StatusCode;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use mediacycle_common::MediaKind;

use crate::media::NavigationContext;

const STYLE: &str = "
body { margin: 0; font-family: sans-serif; background: #111; color: #ddd; }
nav { padding: .5rem 1rem; background: #222; }
nav a { color: #8cf; margin-right: 1rem; }
#stage { display: flex; justify-content: center; align-items: center; height: 75vh; }
#stage img, #stage video { max-width: 100%; max-height: 100%; }
.controls { display: flex; justify-content: center; gap: 1rem; padding: .5rem; }
#files { columns: 3; font-size: .85rem; }
#files li { cursor: pointer; }
#files li.current { color: #fc6; }
.empty, .error { padding: 2rem; text-align: center; }
";

const NAVIGATION_SCRIPT: &str = r#"
(function () {
  const viewer = document.getElementById('viewer');
  if (!viewer) return;
  const dir = viewer.dataset.directory;
  const rel = (file) => (dir ? dir + '/' + file : file);
  const href = (path) => '/data/' + path.split('/').map(encodeURIComponent).join('/');

  function show(ctx) {
    const stage = document.getElementById('stage');
    const el = document.createElement(ctx.is_video ? 'video' : 'img');
    el.id = 'media';
    el.src = href(rel(ctx.current));
    if (ctx.is_video) { el.controls = true; el.autoplay = true; } else { el.alt = ctx.current; }
    stage.replaceChildren(el);
    document.getElementById('prev').dataset.file = ctx.prev;
    document.getElementById('next').dataset.file = ctx.next;
    document.getElementById('position').textContent = (ctx.current_index + 1) + ' / ' + ctx.files.length;
    document.title = ctx.current;
    document.querySelectorAll('#files li').forEach((li, i) => li.classList.toggle('current', i === ctx.current_index));
  }

  function go(file) {
    fetch('/media_context?path=' + encodeURIComponent(rel(file)))
      .then((r) => (r.ok ? r.json() : Promise.reject(r.status)))
      .then(show)
      .catch(() => {});
  }

  document.getElementById('prev').addEventListener('click', (e) => go(e.currentTarget.dataset.file));
  document.getElementById('next').addEventListener('click', (e) => go(e.currentTarget.dataset.file));
  document.querySelectorAll('#files li').forEach((li) => li.addEventListener('click', () => go(li.dataset.file)));
  document.addEventListener('keydown', (e) => {
    if (e.key === 'ArrowLeft') document.getElementById('prev').click();
    if (e.key === 'ArrowRight') document.getElementById('next').click();
  });
})();
"#;

/// `/data/...` URL of a root-relative path, each segment percent-encoded.
pub fn data_href(relative: &str) -> String {
    let segments: Vec<String> = relative
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect();
    format!("/data/{}", segments.join("/"))
}

fn display_path(relative: &str) -> String {
    format!("/{}", relative.trim_matches('/'))
}

fn layout(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
}

fn breadcrumb(directory: &str, parent: Option<&str>) -> Markup {
    html! {
        nav {
            @if let Some(parent) = parent {
                a href=(data_href(parent)) { "Up" }
            }
            span.path { (display_path(directory)) }
        }
    }
}

/// Viewer for the current item of a directory.
pub fn viewer_page(ctx: &NavigationContext) -> Markup {
    let media_url = data_href(&ctx.file_path(&ctx.current));

    layout(
        &ctx.current,
        html! {
            (breadcrumb(&ctx.directory, ctx.parent_directory.as_deref()))
            main #viewer data-directory=(ctx.directory) {
                div #stage {
                    @match ctx.kind() {
                        MediaKind::Video => {
                            video #media src=(media_url) controls autoplay {}
                        }
                        MediaKind::Image => {
                            img #media src=(media_url) alt=(ctx.current);
                        }
                    }
                }
                div.controls {
                    button #prev data-file=(ctx.previous) { "Previous" }
                    span #position { (ctx.current_index + 1) " / " (ctx.files.len()) }
                    button #next data-file=(ctx.next) { "Next" }
                }
                ol #files {
                    @for (index, file) in ctx.files.iter().enumerate() {
                        li.current[index == ctx.current_index] data-file=(file) { (file) }
                    }
                }
            }
            script { (PreEscaped(NAVIGATION_SCRIPT)) }
        },
    )
}

/// Page for a directory with nothing to show.
pub fn empty_page(directory: &str, parent: Option<&str>) -> Markup {
    layout(
        &display_path(directory),
        html! {
            (breadcrumb(directory, parent))
            div.empty {
                p { "No media files in " (display_path(directory)) }
            }
        },
    )
}

/// Generic failure page; carries no detail about the cause.
pub fn error_page(status: StatusCode) -> Markup {
    let message = match status {
        StatusCode::FORBIDDEN => "Access denied.",
        StatusCode::NOT_FOUND => "The requested resource could not be accessed.",
        _ => "Something went wrong.",
    };

    layout(
        "Error",
        html! {
            nav { a href="/data/" { "Home" } }
            div.error {
                h1 { (status.as_u16()) }
                p { (message) }
            }
        },
    )
}
