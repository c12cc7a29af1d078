use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::core::config::AppConfig;
use crate::ui::pages::{
    ClassDetailPage, DashboardPage, EnrollClassPage, EnrollFuturePage, EnrollTeamPage, HomePage,
    NotFoundPage, TeamDetailPage,
};
use crate::ui::{
    DashboardLayout, provide_auth_context, provide_locale_context, provide_theme_context,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="de">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    let _theme = provide_theme_context();
    let _locale = provide_locale_context();
    let _auth = provide_auth_context(&AppConfig::load());

    view! {
        // injects a stylesheet into the document <head>
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/nodeportal.css"/>

        <Title text="Coach Portal"/>

        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=path!("/") view=HomePage/>
                <ParentRoute path=path!("/dashboard") view=DashboardLayout>
                    <Route path=path!("") view=DashboardPage/>
                    <Route path=path!("enroll-team") view=EnrollTeamPage/>
                    <Route path=path!("enroll-class") view=EnrollClassPage/>
                    <Route path=path!("enroll-future") view=EnrollFuturePage/>
                    <Route path=path!("team/:id") view=TeamDetailPage/>
                    <Route path=path!("class/:id") view=ClassDetailPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
