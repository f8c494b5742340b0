use log::{debug, error, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::footer::Footer;
use crate::components::header::Header;

pub mod api;
pub mod components;
pub mod config;
pub mod features;
pub mod hooks;
pub mod pages {
    pub mod dashboard;
    pub mod landing;
    pub mod predictions;
}

use pages::{dashboard::Dashboard, landing::Landing, predictions::Predictions};

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/analytics")]
    Dashboard,
    #[at("/predictions")]
    Predictions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[function_component(App)]
fn app() -> Html {
    debug!("App component rendering");
    html! {
        <BrowserRouter>
            <div class="app-container min-h-screen flex flex-col bg-slate-950 text-slate-100">
                <Header />
                <main class="flex-1">
                    <Switch<Route> render={switch} />
                </main>
                <Footer />
            </div>
        </BrowserRouter>
    }
}

fn switch(routes: Route) -> Html {
    debug!("Route switch: {:?}", routes);
    match routes {
        Route::Landing => {
            debug!("Rendering Landing component");
            html! { <Landing /> }
        }
        Route::Dashboard => {
            debug!("Rendering Dashboard component");
            html! { <Dashboard /> }
        }
        Route::Predictions => {
            debug!("Rendering Predictions component");
            html! { <Predictions /> }
        }
        Route::NotFound => {
            debug!("Unknown route, redirecting to dashboard");
            html! { <Redirect<Route> to={Route::Dashboard} /> }
        }
    }
}

#[wasm_bindgen]
pub async fn run_app() -> Result<(), JsValue> {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    info!("Logger initialized");

    console_error_panic_hook::set_once();
    info!("Panic hook set");

    info!("API base URL: {}", config::Config::api_base_url());
    yew::Renderer::<App>::new().render();
    info!("Application mounted");

    Ok(())
}

// Entry point called by Trunk
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run_app().await {
            error!("Failed to run app: {:?}", e);
        }
    });
    Ok(())
}
