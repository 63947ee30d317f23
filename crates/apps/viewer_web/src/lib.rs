//! Browser shell for the Austin city guide.
//!
//! Rasterization belongs to the embedding JS rendering engine; this
//! crate owns the session state and hands the engine one JSON snapshot
//! per frame (camera, environment, meshes with display materials,
//! visible labels). Pointer and chat input come in through the
//! exported entry points; chat replies are fetched from the guide
//! server and fed back into the session when they arrive.

use std::cell::RefCell;

use console_error_panic_hook::set_once;
use serde_json::json;
use wasm_bindgen::prelude::*;

use foundation::color::Rgba;
use guide::chat::PendingPrompt;
use guide::session::{GuideSession, RenderSnapshot};
use scene::components::{Material, Shape3D};

#[cfg(target_arch = "wasm32")]
use guide::persona::FALLBACK_REPLY;
#[cfg(target_arch = "wasm32")]
use guide::wire::{ChatRequest, ChatResponse};

thread_local! {
    static STATE: RefCell<GuideSession> = RefCell::new(GuideSession::austin());
}

#[wasm_bindgen]
pub fn start() {
    set_once();
}

#[wasm_bindgen]
pub fn resize(width_px: f64, height_px: f64) {
    STATE.with(|state| state.borrow_mut().resize(width_px, height_px));
}

#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) {
    STATE.with(|state| state.borrow_mut().pointer_moved(x_px, y_px));
}

#[wasm_bindgen]
pub fn pointer_click(x_px: f64, y_px: f64) {
    let pending = STATE.with(|state| state.borrow_mut().pointer_clicked(x_px, y_px));
    if let Some(pending) = pending {
        dispatch_chat(pending);
    }
}

#[wasm_bindgen]
pub fn orbit(d_yaw: f64, d_pitch: f64) {
    STATE.with(|state| state.borrow_mut().orbit(d_yaw, d_pitch));
}

#[wasm_bindgen]
pub fn wheel(delta: f64) {
    STATE.with(|state| state.borrow_mut().wheel_zoom(delta));
}

/// Advance the session one frame and return the render snapshot JSON.
#[wasm_bindgen]
pub fn frame(dt_s: f64) -> String {
    STATE.with(|state| {
        let mut session = state.borrow_mut();
        session.tick(dt_s);
        snapshot_json(&session.snapshot())
    })
}

#[wasm_bindgen]
pub fn submit_chat(input: String) {
    let pending = STATE.with(|state| state.borrow_mut().submit_input(&input));
    if let Some(pending) = pending {
        dispatch_chat(pending);
    }
}

#[wasm_bindgen]
pub fn close_selection() {
    STATE.with(|state| state.borrow_mut().close_selection());
}

#[wasm_bindgen]
pub fn toggle_sidebar() {
    STATE.with(|state| state.borrow_mut().toggle_sidebar());
}

#[wasm_bindgen]
pub fn sidebar_open() -> bool {
    STATE.with(|state| state.borrow().sidebar_open())
}

#[wasm_bindgen]
pub fn is_loading() -> bool {
    STATE.with(|state| state.borrow().is_loading())
}

/// The transcript as JSON for the sidebar.
#[wasm_bindgen]
pub fn transcript_json() -> String {
    STATE.with(|state| {
        serde_json::to_string(state.borrow().messages()).unwrap_or_else(|_| "[]".to_string())
    })
}

/// The selected landmark's header card data, or JSON `null`.
#[wasm_bindgen]
pub fn selected_json() -> String {
    STATE.with(|state| {
        let session = state.borrow();
        match session.selected_record() {
            Some(record) => json!({
                "id": record.id,
                "name": record.name,
                "type": record.kind.as_str(),
                "description": record.description,
            })
            .to_string(),
            None => "null".to_string(),
        }
    })
}

/// Send one pending prompt to the guide server; the reply (or the
/// apology string, when the fetch itself fails) resolves the ticket.
fn dispatch_chat(pending: PendingPrompt) {
    #[cfg(target_arch = "wasm32")]
    wasm_bindgen_futures::spawn_local(async move {
        let text = fetch_reply(&pending).await;
        STATE.with(|state| state.borrow_mut().resolve_chat(pending.ticket, text));
    });

    // Native builds exist for tests only; replies are fed manually.
    #[cfg(not(target_arch = "wasm32"))]
    let _ = pending;
}

#[cfg(target_arch = "wasm32")]
async fn fetch_reply(pending: &PendingPrompt) -> String {
    let request = ChatRequest {
        prompt: pending.prompt.clone(),
        history: pending.history.clone(),
    };
    match try_fetch(&request).await {
        Ok(text) => text,
        Err(err) => {
            web_sys::console::warn_1(&format!("chat request failed: {err}").into());
            FALLBACK_REPLY.to_string()
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn try_fetch(request: &ChatRequest) -> Result<String, gloo_net::Error> {
    let response = gloo_net::http::Request::post("/api/chat")
        .json(request)?
        .send()
        .await?;
    let reply: ChatResponse = response.json().await?;
    Ok(reply.text)
}

fn snapshot_json(snapshot: &RenderSnapshot) -> String {
    let meshes: Vec<_> = snapshot
        .meshes
        .iter()
        .map(|mesh| {
            json!({
                "position": [mesh.position.x, mesh.position.y, mesh.position.z],
                "yaw": mesh.yaw_rad,
                "shape": shape_json(&mesh.drawable.shape),
                "material": material_json(&mesh.drawable.material),
            })
        })
        .collect();

    let labels: Vec<_> = snapshot
        .labels
        .iter()
        .map(|label| {
            json!({
                "text": label.text,
                "position": [label.position.x, label.position.y, label.position.z],
            })
        })
        .collect();

    let env = &snapshot.environment;
    json!({
        "camera": {
            "position": [
                snapshot.camera.position.x,
                snapshot.camera.position.y,
                snapshot.camera.position.z,
            ],
            "target": [
                snapshot.camera.target.x,
                snapshot.camera.target.y,
                snapshot.camera.target.z,
            ],
            "fovYDeg": snapshot.camera.fov_y_deg,
        },
        "environment": {
            "ambientIntensity": env.ambient_intensity,
            "directional": {
                "position": [
                    env.directional.position.x,
                    env.directional.position.y,
                    env.directional.position.z,
                ],
                "intensity": env.directional.intensity,
                "shadowMapSize": env.directional.shadow_map_size,
            },
            "fog": {
                "color": color_json(env.fog.color),
                "near": env.fog.near,
                "far": env.fog.far,
            },
            "grid": {
                "size": env.grid.size,
                "height": env.grid.height,
                "cellColor": color_json(env.grid.cell_color),
                "sectionColor": color_json(env.grid.section_color),
                "fadeDistance": env.grid.fade_distance,
            },
            "starfield": {
                "radius": env.starfield.radius,
                "depth": env.starfield.depth,
                "count": env.starfield.count,
            },
        },
        "meshes": meshes,
        "labels": labels,
    })
    .to_string()
}

fn shape_json(shape: &Shape3D) -> serde_json::Value {
    match *shape {
        Shape3D::Box {
            width,
            height,
            depth,
        } => json!({"kind": "box", "size": [width, height, depth]}),
        Shape3D::Cylinder {
            top_radius,
            bottom_radius,
            height,
            radial_segments,
        } => json!({
            "kind": "cylinder",
            "topRadius": top_radius,
            "bottomRadius": bottom_radius,
            "height": height,
            "radialSegments": radial_segments,
        }),
        Shape3D::Sphere { radius } => json!({"kind": "sphere", "radius": radius}),
        Shape3D::Plane { width, depth } => json!({"kind": "plane", "size": [width, depth]}),
    }
}

fn material_json(material: &Material) -> serde_json::Value {
    json!({
        "color": color_json(material.color),
        "emissive": color_json(material.emissive),
        "emissiveIntensity": material.emissive_intensity,
        "roughness": material.roughness,
        "metalness": material.metalness,
        "opacity": material.opacity,
        "transparent": material.transparent,
    })
}

fn color_json(color: Rgba) -> serde_json::Value {
    let [r, g, b, a] = color.to_array();
    json!([r, g, b, a])
}
