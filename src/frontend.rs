use std::rc::Rc;

use tracing::warn;
use web_sys::window;
use yew::prelude::*;

use crate::{
    bindings::install,
    config::InteractionConfig,
    dom::{init_particles, BrowserScheduler, DomSurface},
    particles::{ParticlesConfig, PARTICLES_CANVAS_ID},
    scheduler::Scheduler,
    surface::Surface,
};

struct Skill {
    icon: &'static str,
    title: &'static str,
    detail: &'static str,
}

struct Project {
    title: &'static str,
    summary: &'static str,
    stack: &'static str,
}

const SKILLS: [Skill; 4] = [
    Skill {
        icon: "fas fa-code",
        title: "Frontend",
        detail: "Rust and WebAssembly, TypeScript, responsive CSS",
    },
    Skill {
        icon: "fas fa-server",
        title: "Backend",
        detail: "Async services, REST APIs, PostgreSQL",
    },
    Skill {
        icon: "fas fa-vial",
        title: "Testing",
        detail: "Property tests, browser automation, CI pipelines",
    },
    Skill {
        icon: "fas fa-cloud",
        title: "Operations",
        detail: "Containers, observability, release tooling",
    },
];

const PROJECTS: [Project; 3] = [
    Project {
        title: "Signal Board",
        summary: "Live dashboard for on-call rotations with alert grouping.",
        stack: "Rust, WebSockets, SQLite",
    },
    Project {
        title: "Trailhead",
        summary: "Offline-first trail map that syncs when a connection returns.",
        stack: "TypeScript, IndexedDB, Mapbox",
    },
    Project {
        title: "Ledgerline",
        summary: "Budget tracker that imports bank exports and tags spending.",
        stack: "Python, pandas, FastAPI",
    },
];

const TEST_ELEMENTS: [&str; 4] = ["Hover", "Tap", "Click", "Ripple"];
const FLOATING_ICONS: [&str; 4] = ["fab fa-rust", "fab fa-js", "fab fa-python", "fas fa-database"];

#[derive(Properties, PartialEq)]
struct AppProps {
    config: InteractionConfig,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    {
        let config = props.config.clone();
        use_effect_with((), move |_| {
            if let Some(surface) = DomSurface::new() {
                let surface = Rc::new(surface);
                let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

                if surface.query(&format!("#{PARTICLES_CANVAS_ID}")).is_some() {
                    if let Err(error) = init_particles(&ParticlesConfig::default()) {
                        warn!(event = "particles_skipped", error = %error);
                    }
                }

                install(surface, scheduler, &config);
            }
            || ()
        });
    }

    html! {
        <>
            <div class="preloader" aria-hidden="true"></div>

            <nav class="navbar">
                <a class="nav-logo" href="#home">{"Portfolio"}</a>
                <ul class="nav-menu">
                    <li><a class="nav-link" href="#home">{"Home"}</a></li>
                    <li><a class="nav-link" href="#about">{"About"}</a></li>
                    <li><a class="nav-link" href="#projects">{"Projects"}</a></li>
                    <li><a class="nav-link" href="#contact">{"Contact"}</a></li>
                </ul>
                <div class="hamburger" aria-label="Toggle navigation">
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </div>
            </nav>

            <section id="home" class="hero">
                <div id={PARTICLES_CANVAS_ID}></div>
                <div class="hero-content">
                    <h1 class="hero-title">{"Building calm software for busy people"}</h1>
                    <p class="hero-subtitle">{"Developer focused on fast, dependable web experiences."}</p>
                    <a class="btn btn-primary" href="#projects">{"View Projects"}</a>
                </div>
                <div class="floating-icons" aria-hidden="true">
                    { for FLOATING_ICONS.iter().map(|icon| html! {
                        <div class="floating-icon"><i class={*icon}></i></div>
                    }) }
                </div>
            </section>

            <section id="about" class="about">
                <h2 class="section-title">{"About"}</h2>
                <div class="skills-grid">
                    { for SKILLS.iter().map(|skill| html! {
                        <div class="skill-card" data-aos="fade-up">
                            <i class={skill.icon}></i>
                            <h3>{skill.title}</h3>
                            <p>{skill.detail}</p>
                        </div>
                    }) }
                </div>
                <div class="test-elements">
                    { for TEST_ELEMENTS.iter().map(|label| html! {
                        <div class="test-element" data-aos="zoom-in">{*label}</div>
                    }) }
                </div>
            </section>

            <section id="projects" class="projects">
                <h2 class="section-title">{"Projects"}</h2>
                <div class="projects-grid">
                    { for PROJECTS.iter().map(|project| html! {
                        <article class="project-card" data-aos="fade-up">
                            <h3>{project.title}</h3>
                            <p>{project.summary}</p>
                            <p class="project-stack">{project.stack}</p>
                        </article>
                    }) }
                </div>
            </section>

            <section id="contact" class="contact">
                <h2 class="section-title">{"Contact"}</h2>
                <form class="contact-form" novalidate={true}>
                    <input type="text" name="name" placeholder="Your name" />
                    <input type="email" name="email" placeholder="Your email" />
                    <textarea name="message" rows="5" placeholder="Your message"></textarea>
                    <button class="btn btn-primary" type="submit">{"Send Message"}</button>
                </form>
            </section>

            <footer class="footer">
                <p>{"Made with Rust and WebAssembly."}</p>
            </footer>
        </>
    }
}

pub fn run() {
    console_error_panic_hook::set_once();

    let config = DomSurface::new()
        .map(|surface| InteractionConfig::from_surface(&surface))
        .unwrap_or_default();
    wasm_logger::init(wasm_logger::Config::new(config.log_level.as_log_level()));

    yew::Renderer::<App>::with_root_and_props(
        window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("app"))
            .expect("missing #app mount point"),
        AppProps { config },
    )
    .render();
}
