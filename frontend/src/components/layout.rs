use chrono::Datelike;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent};
use yew::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Text of the toggle button, naming the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "Light",
            Theme::Light => "Dark",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Theme::Dark => "theme-dark",
            Theme::Light => "theme-light",
        }
    }
}

/// Page-wide presentation state, handed to sections through a
/// `ContextProvider` instead of living in globals.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeContext {
    pub theme: Theme,
    pub toggle: Callback<()>,
}

/// Maps a pointer coordinate to `[-1, 1]` across the viewport extent.
pub fn pointer_offset(position: f64, extent: f64) -> f64 {
    if extent <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    ((position / extent - 0.5) * 2.0).clamp(-1.0, 1.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayer {
    pub depth: u32,
    pub opacity: f64,
    pub size: u32,
}

pub const GRID_LAYERS: [GridLayer; 3] = [
    GridLayer { depth: 8, opacity: 0.18, size: 32 },
    GridLayer { depth: 16, opacity: 0.10, size: 24 },
    GridLayer { depth: 32, opacity: 0.06, size: 16 },
];

pub fn grid_layer_style(layer: &GridLayer) -> String {
    format!(
        "transform: translate3d(calc(var(--mx, 0) * {depth}px), calc(var(--my, 0) * {depth}px), 0); \
         background-image: linear-gradient(to right, rgba(255,255,255,{opacity}) 1px, transparent 1px), \
         linear-gradient(to bottom, rgba(255,255,255,{opacity}) 1px, transparent 1px); \
         background-size: {size}px {size}px;",
        depth = layer.depth,
        opacity = layer.opacity,
        size = layer.size,
    )
}

/// Tracks `prefers-reduced-motion`, including changes while the page is open.
#[hook]
fn use_prefers_motion() -> bool {
    let motion_ok = use_state(|| true);

    {
        let motion_ok = motion_ok.clone();
        use_effect_with_deps(
            move |_| {
                let query = web_sys::window()
                    .and_then(|window| window.match_media("(prefers-reduced-motion: reduce)").ok())
                    .flatten();

                let listener = query.map(|query| {
                    motion_ok.set(!query.matches());
                    let watched = query.clone();
                    let callback = Closure::<dyn Fn()>::new(move || {
                        motion_ok.set(!watched.matches());
                    });
                    let _ = query
                        .add_event_listener_with_callback("change", callback.as_ref().unchecked_ref());
                    (query, callback)
                });

                move || {
                    if let Some((query, callback)) = listener {
                        let _ = query.remove_event_listener_with_callback(
                            "change",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    *motion_ok
}

#[function_component(ParallaxGrid)]
fn parallax_grid() -> Html {
    html! {
        <div aria-hidden="true" class="parallax">
            <div class="parallax-tint"></div>
            {
                GRID_LAYERS.iter().map(|layer| html! {
                    <div class="grid-layer" style={grid_layer_style(layer)}></div>
                }).collect::<Html>()
            }
            <div class="parallax-vignette"></div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LayoutProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Layout)]
pub fn layout(props: &LayoutProps) -> Html {
    let theme = use_state(|| Theme::Dark);
    let root_ref = use_node_ref();
    let motion_ok = use_prefers_motion();

    // Pointer position drives the --mx/--my variables the grid layers read.
    {
        let root_ref = root_ref.clone();
        use_effect_with_deps(
            move |motion_ok| {
                let listener = match web_sys::window() {
                    Some(window) if *motion_ok => {
                        let viewport = window.clone();
                        let callback = Closure::<dyn Fn(PointerEvent)>::new(move |e: PointerEvent| {
                            let Some(root) = root_ref.cast::<HtmlElement>() else {
                                return;
                            };
                            let width = viewport.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0);
                            let height = viewport.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0);
                            let x = pointer_offset(e.client_x() as f64, width);
                            let y = pointer_offset(e.client_y() as f64, height);
                            let style = root.style();
                            let _ = style.set_property("--mx", &x.to_string());
                            let _ = style.set_property("--my", &y.to_string());
                        });
                        let _ = window.add_event_listener_with_callback(
                            "pointermove",
                            callback.as_ref().unchecked_ref(),
                        );
                        Some((window, callback))
                    }
                    _ => None,
                };

                move || {
                    if let Some((window, callback)) = listener {
                        let _ = window.remove_event_listener_with_callback(
                            "pointermove",
                            callback.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            motion_ok,
        );
    }

    {
        use_effect_with_deps(
            move |theme| {
                if let Some(root) = web_sys::window()
                    .and_then(|window| window.document())
                    .and_then(|document| document.document_element())
                {
                    let _ = root.class_list().toggle_with_force("dark", *theme == Theme::Dark);
                }
                || ()
            },
            *theme,
        );
    }

    let context = ThemeContext {
        theme: *theme,
        toggle: {
            let theme = theme.clone();
            Callback::from(move |_| theme.set(theme.toggled()))
        },
    };

    let on_toggle = {
        let toggle = context.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    let year = chrono::Local::now().year();

    html! {
        <ContextProvider<ThemeContext> context={context.clone()}>
            <div ref={root_ref} class={classes!("page", context.theme.class())}>
                <style>
                {r#"
                    .page {
                        position: relative;
                        min-height: 100vh;
                        overflow: hidden;
                        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
                    }
                    .page.theme-dark { background: #0A0F1A; color: #fff; }
                    .page.theme-light { background: #F6F8FB; color: #111827; }
                    .parallax { position: absolute; inset: 0; perspective: 800px; }
                    .parallax-tint {
                        position: absolute;
                        inset: 0;
                        background:
                            radial-gradient(1000px 600px at 20% -10%, rgba(14, 95, 255, 0.25), transparent),
                            radial-gradient(800px 500px at 80% 10%, rgba(0, 209, 178, 0.18), transparent);
                    }
                    .grid-layer { position: absolute; inset: 0; will-change: transform; }
                    .parallax-vignette {
                        position: absolute;
                        inset: 0;
                        pointer-events: none;
                        background: radial-gradient(1200px 600px at 50% 20%, transparent, rgba(0, 0, 0, 0.6));
                    }
                    .top-bar {
                        position: sticky;
                        top: 0;
                        z-index: 30;
                        backdrop-filter: blur(10px);
                        background: rgba(0, 0, 0, 0.4);
                    }
                    .top-bar-content, .page-footer-content {
                        max-width: 1200px;
                        margin: 0 auto;
                        padding: 0.75rem 1rem;
                        display: flex;
                        align-items: center;
                        justify-content: space-between;
                    }
                    .brand-link {
                        font-size: 0.875rem;
                        font-weight: 600;
                        letter-spacing: 0.025em;
                        color: rgba(255, 255, 255, 0.8);
                        text-decoration: none;
                    }
                    .top-bar-actions { display: flex; align-items: center; gap: 0.75rem; }
                    .theme-toggle {
                        padding: 0.375rem 0.75rem;
                        border: none;
                        border-radius: 4px;
                        background: rgba(255, 255, 255, 0.1);
                        color: inherit;
                        font-size: 0.75rem;
                        cursor: pointer;
                    }
                    .theme-toggle:hover { background: rgba(255, 255, 255, 0.2); }
                    .apply-link {
                        padding: 0.375rem 0.75rem;
                        border-radius: 4px;
                        background: #0E5FFF;
                        color: #fff;
                        font-size: 0.75rem;
                        font-weight: 600;
                        text-decoration: none;
                    }
                    .apply-link:hover { background: #0b53e6; }
                    .page-main { position: relative; z-index: 10; }
                    .floating-apply {
                        display: none;
                        position: fixed;
                        bottom: 1rem;
                        right: 1rem;
                        z-index: 40;
                        padding: 0.5rem 1rem;
                        border-radius: 9999px;
                        background: #0E5FFF;
                        color: #fff;
                        font-size: 0.875rem;
                        font-weight: 600;
                        text-decoration: none;
                        box-shadow: 0 10px 15px rgba(59, 130, 246, 0.3);
                    }
                    .page-footer {
                        position: relative;
                        z-index: 10;
                        margin-top: 5rem;
                        border-top: 1px solid rgba(255, 255, 255, 0.1);
                    }
                    .page-footer-content { padding: 2.5rem 1rem; font-size: 0.875rem; opacity: 0.7; }
                    @media (max-width: 640px) {
                        .top-bar .apply-link { display: none; }
                        .floating-apply { display: inline-flex; }
                    }
                "#}
                </style>
                <ParallaxGrid />

                <header class="top-bar">
                    <div class="top-bar-content">
                        <a href="#top" class="brand-link">{"Industrial Automation & Robotics"}</a>
                        <div class="top-bar-actions">
                            <button aria-label="Toggle theme" class="theme-toggle" onclick={on_toggle}>
                                {context.theme.toggle_label()}
                            </button>
                            <a href="#apply" class="apply-link">{"Apply Now"}</a>
                        </div>
                    </div>
                </header>

                <main class="page-main">
                    { for props.children.iter() }
                </main>

                <a href="#apply" class="floating-apply">{"Apply"}</a>

                <footer class="page-footer">
                    <div class="page-footer-content">
                        {format!("© {} Industrial Automation & Robotics Program", year)}
                    </div>
                </footer>
            </div>
        </ContextProvider<ThemeContext>>
    }
}
