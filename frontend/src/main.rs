use yew::prelude::*;
use log::info;

mod config;
mod form {
    pub mod draft;
    pub mod validation;
    pub mod submit;
    pub mod controller;
}
mod components {
    pub mod layout;
    pub mod hero;
    pub mod snapshot;
    pub mod application_form;
}

use components::{
    application_form::ApplicationForm,
    hero::Hero,
    layout::Layout,
    snapshot::Snapshot,
};


#[function_component]
fn App() -> Html {
    html! {
        <Layout>
            <Hero />
            <Snapshot />
            <ApplicationForm />
        </Layout>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
