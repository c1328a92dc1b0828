use yew::prelude::*;

use crate::components::layout::{Theme, ThemeContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardIcon {
    Cpu,
    Cog,
    Bot,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotCard {
    pub title: &'static str,
    pub icon: CardIcon,
    pub body: &'static str,
}

pub const CARDS: [SnapshotCard; 3] = [
    SnapshotCard {
        title: "Sensors",
        icon: CardIcon::Cpu,
        body: "Proximity, photoelectric, vision, encoders.",
    },
    SnapshotCard {
        title: "Actuators",
        icon: CardIcon::Cog,
        body: "Servos, pneumatics, conveyors, grippers.",
    },
    SnapshotCard {
        title: "PLCs",
        icon: CardIcon::Bot,
        body: "Ladder, function blocks, motion control.",
    },
];

/// At most one card is expanded; clicking the open card closes it.
pub fn toggle_open(open: Option<usize>, clicked: usize) -> Option<usize> {
    if open == Some(clicked) {
        None
    } else {
        Some(clicked)
    }
}

fn icon_svg(icon: CardIcon) -> Html {
    let shapes = match icon {
        CardIcon::Cpu => html! {
            <>
                <rect x="4" y="4" width="16" height="16" rx="2" />
                <rect x="9" y="9" width="6" height="6" />
                <path d="M9 1v3M15 1v3M9 20v3M15 20v3M20 9h3M20 14h3M1 9h3M1 14h3" />
            </>
        },
        CardIcon::Cog => html! {
            <>
                <circle cx="12" cy="12" r="3" />
                <circle cx="12" cy="12" r="8" />
                <path d="M12 2v2M12 20v2M4.9 4.9l1.4 1.4M17.7 17.7l1.4 1.4M2 12h2M20 12h2M4.9 19.1l1.4-1.4M17.7 6.3l1.4-1.4" />
            </>
        },
        CardIcon::Bot => html! {
            <>
                <rect x="3" y="11" width="18" height="10" rx="2" />
                <circle cx="12" cy="5" r="2" />
                <path d="M12 7v4M8 16h.01M16 16h.01" />
            </>
        },
    };

    html! {
        <svg class="card-icon" viewBox="0 0 24 24" fill="none" stroke="currentColor"
            stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            { shapes }
        </svg>
    }
}

#[function_component(Snapshot)]
pub fn snapshot() -> Html {
    let open = use_state(|| None::<usize>);
    let theme = use_context::<ThemeContext>().map(|context| context.theme).unwrap_or(Theme::Dark);

    html! {
        <section class={classes!("snapshot", (theme == Theme::Light).then(|| "snapshot-light"))}>
            <style>
            {r#"
                .snapshot { padding: 5rem 0; }
                .snapshot-inner { max-width: 1200px; margin: 0 auto; padding: 0 1rem; }
                .snapshot h2 { font-size: 1.875rem; font-weight: 600; margin: 0; }
                .snapshot-grid {
                    margin-top: 2rem;
                    display: grid;
                    grid-template-columns: repeat(3, 1fr);
                    gap: 1rem;
                }
                .snapshot-card {
                    text-align: left;
                    padding: 1.25rem;
                    border-radius: 12px;
                    background: rgba(255, 255, 255, 0.05);
                    border: 1px solid rgba(255, 255, 255, 0.1);
                    color: inherit;
                    cursor: pointer;
                    transition: background-color 0.2s;
                }
                .snapshot-light .snapshot-card { background: rgba(17, 24, 39, 0.04); border-color: rgba(17, 24, 39, 0.1); }
                .snapshot-card:hover { background: rgba(255, 255, 255, 0.1); }
                .snapshot-card:focus { outline: none; box-shadow: 0 0 0 2px #00D1B2; }
                .card-heading { display: flex; align-items: center; gap: 0.75rem; font-weight: 500; }
                .card-icon { width: 20px; height: 20px; color: #00D1B2; }
                .card-body { margin-top: 0.75rem; font-size: 0.875rem; opacity: 0.8; }
                @media (max-width: 768px) {
                    .snapshot-grid { grid-template-columns: 1fr; }
                }
            "#}
            </style>
            <div class="snapshot-inner">
                <h2>{"Program Snapshot"}</h2>
                <div class="snapshot-grid">
                    {
                        CARDS.iter().enumerate().map(|(idx, card)| {
                            let active = *open == Some(idx);
                            let onclick = {
                                let open = open.clone();
                                Callback::from(move |_: MouseEvent| open.set(toggle_open(*open, idx)))
                            };
                            html! {
                                <button key={card.title} class="snapshot-card" aria-expanded={active.to_string()} onclick={onclick}>
                                    <div class="card-heading">
                                        { icon_svg(card.icon) }
                                        <div>{card.title}</div>
                                    </div>
                                    if active {
                                        <div class="card-body">{card.body}</div>
                                    }
                                </button>
                            }
                        }).collect::<Html>()
                    }
                </div>
            </div>
        </section>
    }
}
