//! Page behavior tests: drives the fixture page with the real wasm bundle.
//!
//! ES-module wasm cannot load from file://, so the fixture is served over a
//! minimal local HTTP server. The bundle is built once per run with
//! `wasm-pack build --target web` into `fixtures/browser-site/pkg`.
//!
//! Run with: `cargo test --test browser_page -- --ignored`

use headless_chrome::{Browser, LaunchOptions, Tab};
use std::io::{BufRead as _, BufReader, Write as _};
use std::net::{TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::Duration;

// ===========================================================================
// Static file server (module scripts and wasm need HTTP, not file://)
// ===========================================================================

/// Serves `root` on an ephemeral port from a detached thread for the rest of
/// the test process.
struct TestServer {
    port: u16,
}

impl TestServer {
    fn start(root: PathBuf) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let root = root.clone();
                thread::spawn(move || serve_file(stream, &root));
            }
        });
        Self { port }
    }

    fn url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript",
        Some("wasm") => "application/wasm",
        _ => "application/octet-stream",
    }
}

/// Answer one GET with the file under `root`, or 404. Query strings are
/// ignored.
fn serve_file(mut stream: TcpStream, root: &Path) {
    let mut request_line = String::new();
    if BufReader::new(&stream).read_line(&mut request_line).is_err() {
        return;
    }
    let target = request_line.split(' ').nth(1).unwrap_or("/");
    let target = target.split('?').next().unwrap_or(target).trim_start_matches('/');
    let path = root.join(if target.is_empty() { "index.html" } else { target });

    let response = match std::fs::read(&path) {
        Ok(body) => [
            format!(
                "HTTP/1.1 200 OK\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                content_type(&path),
                body.len()
            )
            .into_bytes(),
            body,
        ]
        .concat(),
        Err(_) => b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_vec(),
    };
    let _ = stream.write_all(&response);
}

// ===========================================================================
// Setup helpers
// ===========================================================================

fn site_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/browser-site")
}

fn ensure_bundle_built() {
    static BUILT: OnceLock<()> = OnceLock::new();
    BUILT.get_or_init(|| {
        let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let status = Command::new("wasm-pack")
            .current_dir(&root)
            .args([
                "build",
                "--dev",
                "--target",
                "web",
                "--out-dir",
                "fixtures/browser-site/pkg",
            ])
            .status()
            .expect("failed to run wasm-pack");
        assert!(status.success(), "wasm bundle build failed");
    });
}

fn browser() -> &'static Browser {
    static B: OnceLock<Browser> = OnceLock::new();
    B.get_or_init(|| {
        Browser::new(LaunchOptions {
            window_size: Some((1280, 800)),
            ..Default::default()
        })
        .expect("failed to launch Chrome")
    })
}

fn start_server() -> TestServer {
    ensure_bundle_built();
    TestServer::start(site_dir())
}

/// Open the fixture in a fresh tab with clean storage and wait for the
/// wasm start function to finish.
fn open_page(server: &TestServer) -> Arc<Tab> {
    let tab = browser().new_tab().unwrap();
    tab.navigate_to(&server.url())
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    tab.evaluate("localStorage.clear()", false).unwrap();
    tab.navigate_to(&server.url())
        .unwrap()
        .wait_until_navigated()
        .unwrap();
    wait_for_start(&tab);
    tab
}

/// Wait for the module script to flag that the wasm start function returned.
/// Panics after 10 s.
fn wait_for_start(tab: &Tab) {
    tab.evaluate(
        r#"new Promise((resolve, reject) => {
            const started = Date.now();
            const poll = () => {
                if (window.folioReady) return resolve('ok');
                if (Date.now() - started > 10000) return reject('wasm start timeout (10 s)');
                setTimeout(poll, 20);
            };
            poll();
        })"#,
        true,
    )
    .expect("wasm bundle failed to start");
}

fn eval_string(tab: &Tab, js: &str) -> String {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn eval_bool(tab: &Tab, js: &str) -> bool {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_bool()
        .unwrap()
}

fn eval_u64(tab: &Tab, js: &str) -> u64 {
    tab.evaluate(js, false)
        .unwrap()
        .value
        .unwrap()
        .as_u64()
        .unwrap()
}

fn press(tab: &Tab, target: &str, key: &str, shift: bool) {
    let js = format!(
        r#"{target}.dispatchEvent(new KeyboardEvent('keydown', {{
            key: '{key}', shiftKey: {shift}, bubbles: true, cancelable: true
        }}))"#
    );
    tab.evaluate(&js, false).unwrap();
}

fn announced(tab: &Tab, message: &str) -> bool {
    eval_bool(
        tab,
        &format!(
            r#"[...document.querySelectorAll('[aria-live="polite"]')]
                .some(n => n.textContent === '{message}')"#
        ),
    )
}

// ===========================================================================
// Theme
// ===========================================================================

#[test]
#[ignore]
fn theme_toggle_keeps_attribute_and_storage_in_step() {
    let server = start_server();
    let tab = open_page(&server);
    let before = eval_string(&tab, "document.documentElement.dataset.theme");
    assert!(before == "light" || before == "dark", "got {before:?}");

    for _ in 0..3 {
        let prior = eval_string(&tab, "document.documentElement.dataset.theme");
        tab.evaluate("document.querySelector('.theme-toggle').click()", false)
            .unwrap();
        let now = eval_string(&tab, "document.documentElement.dataset.theme");
        let stored = eval_string(&tab, "localStorage.getItem('theme')");
        assert_ne!(now, prior);
        assert_eq!(now, stored);
    }
}

#[test]
#[ignore]
fn stored_theme_wins_on_reload() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate("localStorage.setItem('theme', 'dark')", false)
        .unwrap();
    tab.reload(false, None).unwrap();
    tab.wait_until_navigated().unwrap();
    wait_for_start(&tab);
    assert_eq!(
        eval_string(&tab, "document.documentElement.dataset.theme"),
        "dark"
    );
}

// ===========================================================================
// Partner logos and experience cards
// ===========================================================================

#[test]
#[ignore]
fn racq_logo_opens_new_tab_and_announces() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate(
        "window.__opened = []; window.open = (...args) => { window.__opened.push(args); return null; }",
        false,
    )
    .unwrap();

    assert_eq!(
        eval_string(&tab, "document.getElementById('logo-racq').getAttribute('aria-label')"),
        "Visit RACQ website (opens in new tab)"
    );
    tab.evaluate("document.getElementById('logo-racq').click()", false)
        .unwrap();

    assert_eq!(
        eval_string(&tab, "window.__opened[0][0]"),
        "https://www.racq.com.au/"
    );
    assert_eq!(eval_string(&tab, "window.__opened[0][1]"), "_blank");
    assert!(announced(&tab, "Opening RACQ website in new tab"));
}

#[test]
#[ignore]
fn unknown_logo_and_card_without_url_stay_inert() {
    let server = start_server();
    let tab = open_page(&server);
    assert!(!eval_bool(
        &tab,
        "document.getElementById('logo-unknown').classList.contains('partner-logo-clickable')"
    ));
    assert!(!eval_bool(
        &tab,
        "document.getElementById('exp-missing').classList.contains('experience-card-clickable')"
    ));
    assert!(eval_bool(
        &tab,
        "document.getElementById('exp-nous').classList.contains('experience-card-clickable')"
    ));
    assert_eq!(
        eval_string(&tab, "document.getElementById('logo-unknown').dataset.folioLink"),
        "inert"
    );
    assert_eq!(
        eval_string(&tab, "document.getElementById('logo-unknown').getAttribute('role') ?? ''"),
        ""
    );
}

#[test]
#[ignore]
fn experience_card_is_a_keyboard_button() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate(
        "window.__opened = []; window.open = (...args) => { window.__opened.push(args); return null; }",
        false,
    )
    .unwrap();
    let card = "document.getElementById('exp-nous')";

    assert_eq!(eval_string(&tab, &format!("{card}.getAttribute('role')")), "button");
    assert_eq!(eval_string(&tab, &format!("{card}.getAttribute('tabindex')")), "0");
    assert_eq!(eval_string(&tab, &format!("{card}.style.cursor")), "pointer");
    assert_eq!(
        eval_string(&tab, &format!("{card}.getAttribute('aria-label')")),
        "Visit Nous Group website (opens in new tab)"
    );

    press(&tab, card, "Enter", false);
    assert_eq!(
        eval_string(&tab, "window.__opened[0][0]"),
        "https://www.nousgroup.com/"
    );
    assert!(announced(&tab, "Opening Nous Group website in new tab"));
}

#[test]
#[ignore]
fn logos_added_later_are_activated() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate(
        r#"const img = document.createElement('img');
           img.id = 'logo-aemo';
           img.src = 'assets/logos/AEMO.png';
           document.querySelector('.org-logos').appendChild(img);"#,
        false,
    )
    .unwrap();
    thread::sleep(Duration::from_millis(100));
    assert!(eval_bool(
        &tab,
        "document.getElementById('logo-aemo').classList.contains('partner-logo-clickable')"
    ));
}

// ===========================================================================
// Header, reveal and counters
// ===========================================================================

#[test]
#[ignore]
fn header_restyles_when_theme_changes() {
    let server = start_server();
    let tab = open_page(&server);
    let background = "document.querySelector('.main-header').style.backgroundColor";

    assert_eq!(eval_string(&tab, background), "");
    tab.evaluate(
        "document.documentElement.setAttribute('data-theme', 'light'); window.scrollTo(0, 500)",
        false,
    )
    .unwrap();
    thread::sleep(Duration::from_millis(100));
    assert_eq!(eval_string(&tab, background), "rgba(255, 255, 255, 0.95)");

    tab.evaluate("document.documentElement.setAttribute('data-theme', 'dark')", false)
        .unwrap();
    thread::sleep(Duration::from_millis(50));
    assert_eq!(eval_string(&tab, background), "rgba(26, 26, 26, 0.95)");
}

#[test]
#[ignore]
fn reveal_happens_once() {
    let server = start_server();
    let tab = open_page(&server);
    let first = "document.querySelector('.wow')";
    thread::sleep(Duration::from_millis(300));

    assert!(eval_bool(&tab, &format!("{first}.classList.contains('animate')")));
    assert_eq!(eval_string(&tab, &format!("{first}.style.visibility")), "visible");

    tab.evaluate(&format!("{first}.classList.remove('animate')"), false)
        .unwrap();
    tab.evaluate("window.scrollTo(0, document.body.scrollHeight)", false)
        .unwrap();
    thread::sleep(Duration::from_millis(200));
    tab.evaluate("window.scrollTo(0, 0)", false).unwrap();
    thread::sleep(Duration::from_millis(300));
    assert!(!eval_bool(&tab, &format!("{first}.classList.contains('animate')")));
}

#[test]
#[ignore]
fn counters_end_on_their_target() {
    let server = start_server();
    let tab = open_page(&server);
    // counter_ms defaults to 2000.
    thread::sleep(Duration::from_millis(2600));
    assert_eq!(
        eval_string(
            &tab,
            "[...document.querySelectorAll('[data-target]')].map(e => e.textContent).join(',')"
        ),
        "150,98"
    );
}

#[test]
#[ignore]
fn announcement_node_is_removed_after_its_lifetime() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate("document.querySelector('.theme-toggle').click()", false)
        .unwrap();
    let live = "document.querySelectorAll('[aria-live=\"polite\"]').length";
    assert!(announced(&tab, "Switched to dark mode") || announced(&tab, "Switched to light mode"));

    // The fixture sets announce_ms = 2000.
    thread::sleep(Duration::from_millis(2500));
    assert_eq!(eval_u64(&tab, live), 0);
}

// ===========================================================================
// Service cards
// ===========================================================================

#[test]
#[ignore]
fn expanding_second_card_collapses_first() {
    let server = start_server();
    let tab = open_page(&server);
    let expanded = "document.querySelectorAll('.service-card.expanded').length";

    tab.evaluate("document.getElementById('card-strategy').click()", false)
        .unwrap();
    assert_eq!(eval_u64(&tab, expanded), 1);
    tab.evaluate("document.getElementById('card-delivery').click()", false)
        .unwrap();
    assert_eq!(eval_u64(&tab, expanded), 1);
    assert!(eval_bool(
        &tab,
        "document.getElementById('card-delivery').classList.contains('expanded')"
    ));
    assert_eq!(
        eval_string(&tab, "document.getElementById('card-strategy').getAttribute('aria-expanded')"),
        "false"
    );
    assert!(announced(&tab, "Delivery service details expanded"));
}

#[test]
#[ignore]
fn outside_click_and_close_button_collapse() {
    let server = start_server();
    let tab = open_page(&server);
    let expanded = "document.querySelectorAll('.service-card.expanded').length";

    tab.evaluate("document.getElementById('card-ai').click()", false)
        .unwrap();
    tab.evaluate("document.body.click()", false).unwrap();
    assert_eq!(eval_u64(&tab, expanded), 0);

    tab.evaluate("document.getElementById('card-strategy').click()", false)
        .unwrap();
    tab.evaluate("document.querySelector('[data-service-close]').click()", false)
        .unwrap();
    assert_eq!(eval_u64(&tab, expanded), 0);
}

#[test]
#[ignore]
fn keyboard_toggles_and_escape_collapses_card() {
    let server = start_server();
    let tab = open_page(&server);
    let card = "document.getElementById('card-ai')";

    press(&tab, card, "Enter", false);
    assert!(eval_bool(&tab, &format!("{card}.classList.contains('expanded')")));
    press(&tab, card, "Escape", false);
    assert!(!eval_bool(&tab, &format!("{card}.classList.contains('expanded')")));
}

// ===========================================================================
// Modal
// ===========================================================================

#[test]
#[ignore]
fn modal_round_trip_restores_focus_and_page_state() {
    let server = start_server();
    let tab = open_page(&server);
    let modal = "document.getElementById('photoModal')";

    tab.evaluate("document.getElementById('portrait').focus()", false)
        .unwrap();
    let overflow_before = eval_string(&tab, "document.body.style.overflow");
    press(&tab, "document.getElementById('portrait')", "Enter", false);

    assert!(eval_bool(&tab, &format!("{modal}.classList.contains('active')")));
    assert_eq!(eval_string(&tab, "document.body.style.overflow"), "hidden");
    assert!(announced(&tab, "Image modal opened. Press Escape to close."));
    thread::sleep(Duration::from_millis(300));
    assert_eq!(eval_string(&tab, "document.activeElement.id"), "modalClose");

    press(&tab, "document", "Escape", false);
    assert!(!eval_bool(&tab, &format!("{modal}.classList.contains('active')")));
    assert_eq!(eval_string(&tab, "document.activeElement.id"), "portrait");
    assert_eq!(eval_string(&tab, "document.body.style.overflow"), overflow_before);
    assert_eq!(eval_string(&tab, &format!("{modal}.getAttribute('aria-hidden')")), "true");
    assert!(announced(&tab, "Image modal closed."));
}

#[test]
#[ignore]
fn broken_image_is_announced_and_modal_stays_open() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate("document.getElementById('portrait').click()", false)
        .unwrap();
    tab.evaluate(
        "document.getElementById('modalImage').src = 'assets/does-not-exist.png'",
        false,
    )
    .unwrap();
    thread::sleep(Duration::from_millis(300));

    assert!(announced(&tab, "Error: Image could not be loaded"));
    assert!(eval_bool(
        &tab,
        "document.getElementById('photoModal').classList.contains('active')"
    ));
}

#[test]
#[ignore]
fn quick_close_keeps_focus_on_trigger() {
    let server = start_server();
    let tab = open_page(&server);
    // Keep the close control focusable while closed, as pages that fade the
    // overlay out with opacity do.
    tab.evaluate(
        r#"const style = document.createElement('style');
           style.textContent = '.photo-modal { display: block; opacity: 0; }';
           document.head.appendChild(style);"#,
        false,
    )
    .unwrap();

    tab.evaluate("document.getElementById('portrait').focus()", false)
        .unwrap();
    press(&tab, "document.getElementById('portrait')", "Enter", false);
    press(&tab, "document", "Escape", false);
    thread::sleep(Duration::from_millis(300));
    assert_eq!(eval_string(&tab, "document.activeElement.id"), "portrait");
}

#[test]
#[ignore]
fn tab_never_leaves_open_modal() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate("document.getElementById('harvard').click()", false)
        .unwrap();
    thread::sleep(Duration::from_millis(300));

    for shift in [false, false, false, false, true, true, true, true, true] {
        press(&tab, "document", "Tab", shift);
        assert!(
            eval_bool(
                &tab,
                "document.getElementById('photoModal').contains(document.activeElement)"
            ),
            "focus escaped the modal (shift={shift})"
        );
    }
}

#[test]
#[ignore]
fn three_certificate_paths_open_emphasizable_gallery() {
    let server = start_server();
    let tab = open_page(&server);
    tab.evaluate("document.getElementById('harvard').click()", false)
        .unwrap();

    assert_eq!(
        eval_u64(&tab, "document.querySelectorAll('#photoModal .certificate-item').length"),
        3
    );
    for i in 0..3 {
        tab.evaluate(
            &format!("document.querySelectorAll('.certificate-item img')[{i}].click()"),
            false,
        )
        .unwrap();
        let transforms = eval_string(
            &tab,
            "[...document.querySelectorAll('.certificate-item')].map(e => e.style.transform).join('|')",
        );
        let parts: Vec<&str> = transforms.split('|').collect();
        for (j, t) in parts.iter().enumerate() {
            let want = if i == j { "scale(1.02)" } else { "scale(0.95)" };
            assert_eq!(*t, want, "item {j} after clicking {i}");
        }
    }
    assert!(eval_bool(&tab, "document.getElementById('photoModal').classList.contains('active')"));

    tab.evaluate("document.getElementById('modalClose').click()", false)
        .unwrap();
    assert_eq!(
        eval_u64(&tab, "document.querySelectorAll('#modalImage').length"),
        1
    );
    assert_eq!(
        eval_u64(&tab, "document.querySelectorAll('.certificate-item').length"),
        0
    );
}

#[test]
#[ignore]
fn exported_functions_drive_components() {
    let server = start_server();
    let tab = open_page(&server);

    tab.evaluate("window.folio.open_certificate_gallery()", false)
        .unwrap();
    assert_eq!(
        eval_u64(&tab, "document.querySelectorAll('.certificate-item').length"),
        3
    );
    press(&tab, "document", "Escape", false);

    tab.evaluate("document.getElementById('card-strategy').click()", false)
        .unwrap();
    tab.evaluate("window.folio.close_current_service_card()", false)
        .unwrap();
    assert_eq!(
        eval_u64(&tab, "document.querySelectorAll('.service-card.expanded').length"),
        0
    );

    let before = eval_string(&tab, "document.documentElement.dataset.theme");
    tab.evaluate("window.folio.toggle_theme()", false).unwrap();
    assert_ne!(
        eval_string(&tab, "document.documentElement.dataset.theme"),
        before
    );
}
