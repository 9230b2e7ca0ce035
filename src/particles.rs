//! Declarative configuration for the particles.js background.
//!
//! Field names follow the library's option object, so the serialized JSON can
//! be handed to `particlesJS` unchanged.

use serde::Serialize;

pub const PARTICLES_CANVAS_ID: &str = "particles-js";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticlesConfig {
    pub particles: Particles,
    pub interactivity: Interactivity,
    pub retina_detect: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Particles {
    pub number: ParticleNumber,
    pub color: ColorValue,
    pub shape: Shape,
    pub opacity: Opacity,
    pub size: Size,
    pub line_linked: LineLinked,
    #[serde(rename = "move")]
    pub motion: Motion,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleNumber {
    pub value: u32,
    pub density: Density,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Density {
    pub enable: bool,
    pub value_area: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColorValue {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    #[serde(rename = "type")]
    pub kind: String,
    pub stroke: Stroke,
    pub polygon: Polygon,
    pub image: ShapeImage,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub width: u32,
    pub color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Polygon {
    pub nb_sides: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShapeImage {
    pub src: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Opacity {
    pub value: f64,
    pub random: bool,
    pub anim: OpacityAnim,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpacityAnim {
    pub enable: bool,
    pub speed: f64,
    pub opacity_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Size {
    pub value: f64,
    pub random: bool,
    pub anim: SizeAnim,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SizeAnim {
    pub enable: bool,
    pub speed: f64,
    pub size_min: f64,
    pub sync: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineLinked {
    pub enable: bool,
    pub distance: u32,
    pub color: String,
    pub opacity: f64,
    pub width: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Motion {
    pub enable: bool,
    pub speed: f64,
    pub direction: String,
    pub random: bool,
    pub straight: bool,
    pub out_mode: String,
    pub bounce: bool,
    pub attract: Attract,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attract {
    pub enable: bool,
    pub rotate_x: u32,
    pub rotate_y: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Interactivity {
    pub detect_on: String,
    pub events: InteractivityEvents,
    pub modes: Modes,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InteractivityEvents {
    pub onhover: EventMode,
    pub onclick: EventMode,
    pub resize: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventMode {
    pub enable: bool,
    pub mode: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Modes {
    pub grab: Grab,
    pub bubble: Bubble,
    pub repulse: Repulse,
    pub push: ParticleCount,
    pub remove: ParticleCount,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grab {
    pub distance: u32,
    pub line_linked: GrabLine,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GrabLine {
    pub opacity: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bubble {
    pub distance: u32,
    pub size: u32,
    pub duration: f64,
    pub opacity: f64,
    pub speed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Repulse {
    pub distance: u32,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ParticleCount {
    pub particles_nb: u32,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            particles: Particles {
                number: ParticleNumber {
                    value: 80,
                    density: Density {
                        enable: true,
                        value_area: 800,
                    },
                },
                color: ColorValue {
                    value: "#ffffff".to_string(),
                },
                shape: Shape {
                    kind: "circle".to_string(),
                    stroke: Stroke {
                        width: 0,
                        color: "#000000".to_string(),
                    },
                    polygon: Polygon { nb_sides: 5 },
                    image: ShapeImage {
                        src: "img/github.svg".to_string(),
                        width: 100,
                        height: 100,
                    },
                },
                opacity: Opacity {
                    value: 0.5,
                    random: false,
                    anim: OpacityAnim {
                        enable: false,
                        speed: 1.0,
                        opacity_min: 0.1,
                        sync: false,
                    },
                },
                size: Size {
                    value: 3.0,
                    random: true,
                    anim: SizeAnim {
                        enable: false,
                        speed: 40.0,
                        size_min: 0.1,
                        sync: false,
                    },
                },
                line_linked: LineLinked {
                    enable: true,
                    distance: 150,
                    color: "#ffffff".to_string(),
                    opacity: 0.4,
                    width: 1,
                },
                motion: Motion {
                    enable: true,
                    speed: 6.0,
                    direction: "none".to_string(),
                    random: false,
                    straight: false,
                    out_mode: "out".to_string(),
                    bounce: false,
                    attract: Attract {
                        enable: false,
                        rotate_x: 600,
                        rotate_y: 1200,
                    },
                },
            },
            interactivity: Interactivity {
                detect_on: "canvas".to_string(),
                events: InteractivityEvents {
                    onhover: EventMode {
                        enable: false,
                        mode: "repulse".to_string(),
                    },
                    onclick: EventMode {
                        enable: false,
                        mode: "push".to_string(),
                    },
                    resize: true,
                },
                modes: Modes {
                    grab: Grab {
                        distance: 400,
                        line_linked: GrabLine { opacity: 1.0 },
                    },
                    bubble: Bubble {
                        distance: 400,
                        size: 40,
                        duration: 2.0,
                        opacity: 8.0,
                        speed: 3.0,
                    },
                    repulse: Repulse {
                        distance: 200,
                        duration: 0.4,
                    },
                    push: ParticleCount { particles_nb: 4 },
                    remove: ParticleCount { particles_nb: 2 },
                },
            },
            retina_detect: false,
        }
    }
}

impl ParticlesConfig {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn serializes_library_field_names() {
        let value: Value = serde_json::to_value(ParticlesConfig::default()).expect("serializable");

        assert_eq!(value["particles"]["number"]["value"], json!(80));
        assert_eq!(value["particles"]["shape"]["type"], json!("circle"));
        assert_eq!(value["particles"]["move"]["speed"], json!(6.0));
        assert_eq!(value["particles"]["move"]["attract"]["rotateX"], json!(600));
        assert_eq!(value["particles"]["line_linked"]["distance"], json!(150));
        assert_eq!(value["interactivity"]["events"]["onhover"]["enable"], json!(false));
        assert_eq!(value["retina_detect"], json!(false));
        assert!(value["particles"].get("motion").is_none());
    }

    #[test]
    fn json_text_round_trips_through_serde_json() {
        let text = ParticlesConfig::default().to_json().expect("serializable");
        let parsed: Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(parsed["particles"]["opacity"]["value"], json!(0.5));
    }
}
