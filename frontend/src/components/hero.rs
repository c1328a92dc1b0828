use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Array, Date};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

use crate::components::layout::{Theme, ThemeContext};

pub const COUNTER_DURATION_MS: f64 = 1200.0;
const FRAME_MS: u32 = 16;
const VISIBLE_THRESHOLD: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kpi {
    pub label: &'static str,
    pub value: u32,
}

pub const KPIS: [Kpi; 3] = [
    Kpi { label: "Hours of Labs", value: 240 },
    Kpi { label: "Industry Projects", value: 8 },
    Kpi { label: "Placement Rate %", value: 96 },
];

pub fn ease_out_cubic(x: f64) -> f64 {
    1.0 - (1.0 - x).powi(3)
}

/// Value shown by a counter `elapsed_ms` into its animation.
pub fn counter_value(end: u32, elapsed_ms: f64, duration_ms: f64) -> u32 {
    let progress = if duration_ms <= 0.0 {
        1.0
    } else {
        (elapsed_ms / duration_ms).clamp(0.0, 1.0)
    };
    (end as f64 * ease_out_cubic(progress)).round() as u32
}

/// Watches an element and fires `on_visible` every time at least
/// `threshold` of it scrolls into view. Disconnects on drop.
pub struct VisibilityWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl VisibilityWatch {
    pub fn on_visible(target: &Element, threshold: f64, on_visible: Callback<()>) -> Option<Self> {
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_visible.emit(());
                    }
                }
            },
        );

        let mut options = IntersectionObserverInit::new();
        options.threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options).ok()?;
        observer.observe(target);

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// False while the window is blurred; animations hold still meanwhile.
#[hook]
fn use_window_focus() -> Rc<Cell<bool>> {
    let playing = use_memo(|_| Rc::new(Cell::new(true)), ());
    let playing = (*playing).clone();

    {
        let playing = playing.clone();
        use_effect_with_deps(
            move |_| {
                let listeners = web_sys::window().map(|window| {
                    let on_blur = {
                        let playing = playing.clone();
                        Closure::<dyn Fn()>::new(move || playing.set(false))
                    };
                    let on_focus = Closure::<dyn Fn()>::new(move || playing.set(true));
                    let _ = window.add_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
                    let _ = window.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
                    (window, on_blur, on_focus)
                });

                move || {
                    if let Some((window, on_blur, on_focus)) = listeners {
                        let _ = window.remove_event_listener_with_callback("blur", on_blur.as_ref().unchecked_ref());
                        let _ = window.remove_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
                    }
                }
            },
            (),
        );
    }

    playing
}

#[derive(Properties, PartialEq)]
pub struct KpiCounterProps {
    pub kpi: Kpi,
}

#[function_component(KpiCounter)]
pub fn kpi_counter(props: &KpiCounterProps) -> Html {
    let end = props.kpi.value;
    let node = use_node_ref();
    let value = use_state(|| 0u32);
    let ticker = use_mut_ref(|| None::<Interval>);
    let playing = use_window_focus();

    let on_visible = {
        let value = value.clone();
        let ticker = ticker.clone();
        Callback::from(move |_| {
            let started = Date::now();
            let value = value.clone();
            let playing = playing.clone();
            let finished = ticker.clone();
            let interval = Interval::new(FRAME_MS, move || {
                if !playing.get() {
                    return;
                }
                let elapsed = Date::now() - started;
                value.set(counter_value(end, elapsed, COUNTER_DURATION_MS));
                if elapsed >= COUNTER_DURATION_MS {
                    // The interval can't be dropped from inside its own tick.
                    let finished = finished.clone();
                    Timeout::new(0, move || {
                        finished.borrow_mut().take();
                    })
                    .forget();
                }
            });
            *ticker.borrow_mut() = Some(interval);
        })
    };

    {
        let node = node.clone();
        let ticker = ticker.clone();
        use_effect_with_deps(
            move |_| {
                let watch = node
                    .cast::<Element>()
                    .and_then(|target| VisibilityWatch::on_visible(&target, VISIBLE_THRESHOLD, on_visible));
                if watch.is_none() {
                    log::debug!("Counter visibility watch unavailable, leaving value at 0");
                }
                move || {
                    drop(watch);
                    ticker.borrow_mut().take();
                }
            },
            (),
        );
    }

    html! {
        <div class="kpi">
            <div ref={node} class="kpi-value">{*value}</div>
            <div class="kpi-label">{props.kpi.label}</div>
        </div>
    }
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let theme = use_context::<ThemeContext>().map(|context| context.theme).unwrap_or(Theme::Dark);
    let card_class = match theme {
        Theme::Dark => "kpi-grid dark-cards",
        Theme::Light => "kpi-grid light-cards",
    };

    html! {
        <section id="top" class="hero">
            <style>
            {r#"
                .hero {
                    position: relative;
                    min-height: 80vh;
                    display: flex;
                    align-items: center;
                }
                .hero-backdrop {
                    position: absolute;
                    inset: 0;
                    background:
                        radial-gradient(600px 400px at 70% 40%, rgba(14, 95, 255, 0.35), transparent),
                        radial-gradient(500px 300px at 85% 70%, rgba(0, 209, 178, 0.25), transparent);
                }
                .hero-inner {
                    position: relative;
                    z-index: 10;
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 6rem 1rem;
                    width: 100%;
                }
                .hero-copy { max-width: 58%; }
                .hero h1 { font-size: 3rem; font-weight: 600; line-height: 1.15; margin: 0; }
                .hero-lede { margin-top: 1rem; opacity: 0.8; max-width: 65ch; }
                .hero-ctas { margin-top: 2rem; display: flex; flex-wrap: wrap; gap: 0.75rem; }
                .hero-cta {
                    padding: 0.75rem 1.25rem;
                    border-radius: 8px;
                    font-weight: 500;
                    text-decoration: none;
                    color: inherit;
                    transition: background-color 0.2s;
                }
                .hero-cta.primary { background: #0E5FFF; color: #fff; }
                .hero-cta.primary:hover { background: #0b53e6; }
                .hero-cta.secondary { background: rgba(255, 255, 255, 0.1); }
                .hero-cta.secondary:hover { background: rgba(255, 255, 255, 0.2); }
                .kpi-grid {
                    margin-top: 2rem;
                    display: grid;
                    grid-template-columns: repeat(3, 1fr);
                    gap: 1.5rem;
                    text-align: center;
                }
                .kpi { border-radius: 8px; padding: 1rem; backdrop-filter: blur(8px); }
                .dark-cards .kpi { background: rgba(0, 0, 0, 0.3); }
                .light-cards .kpi { background: rgba(255, 255, 255, 0.7); }
                .kpi-value { font-size: 1.875rem; font-weight: 600; }
                .kpi-label { font-size: 0.75rem; margin-top: 0.25rem; opacity: 0.7; }
                @media (max-width: 768px) {
                    .hero-copy { max-width: 100%; }
                    .hero h1 { font-size: 1.875rem; }
                }
            "#}
            </style>
            <div class="hero-backdrop" aria-hidden="true"></div>
            <div class="hero-inner">
                <div class="hero-copy">
                    <h1>{"Industrial Automation & Robotics Program"}</h1>
                    <p class="hero-lede">
                        {"Learn PLCs, robotics, vision systems and integration by building real cells. Motion-first website with interactive demos throughout."}
                    </p>
                    <div class="hero-ctas">
                        <a href="#apply" class="hero-cta primary">{"Apply Now"}</a>
                        <a href="#curriculum" class="hero-cta secondary">{"Explore Curriculum"}</a>
                    </div>
                    <div class={card_class}>
                        {
                            KPIS.iter().map(|kpi| html! {
                                <KpiCounter key={kpi.label} kpi={*kpi} />
                            }).collect::<Html>()
                        }
                    </div>
                </div>
            </div>
        </section>
    }
}
