use catalog::{Catalog, LandmarkRecord};
use foundation::math::Vec3;
use runtime::{Event, EventBus, Frame};
use scene::animate::animate_landmarks;
use scene::camera::MapCamera;
use scene::components::Drawable3D;
use scene::entity::EntityId;
use scene::picking::{PickHit, PickOptions, pick_ray};
use scene::prefabs::{CityScene, Environment, compose_city, display_material};
use scene::selection::Selection;

use crate::chat::{ChatController, ChatMessage, PendingPrompt};

const DEFAULT_VIEWPORT: (f64, f64) = (1280.0, 720.0);
const DEFAULT_DT_S: f64 = 1.0 / 60.0;

/// One drawable for the external renderer, display state applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderMesh {
    pub position: Vec3,
    pub yaw_rad: f64,
    pub drawable: Drawable3D,
}

/// A visible landmark label.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderLabel {
    pub text: String,
    pub position: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_y_deg: f64,
}

/// Everything the external rendering engine needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub meshes: Vec<RenderMesh>,
    pub labels: Vec<RenderLabel>,
    pub camera: RenderCamera,
    pub environment: Environment,
}

/// Root composer: owns the map, the camera, the chat, and the view
/// state, and wires them together.
///
/// All methods are synchronous; async I/O stays at the app edge. A
/// click hands back a [`PendingPrompt`] which the app dispatches
/// through the gateway and feeds back via
/// [`GuideSession::resolve_chat`].
pub struct GuideSession {
    catalog: Catalog,
    scene: CityScene,
    camera: MapCamera,
    chat: ChatController,
    selection: Selection,
    hovered: Option<EntityId>,
    sidebar_open: bool,
    viewport: (f64, f64),
    frame: Frame,
    events: EventBus,
}

impl GuideSession {
    pub fn new(catalog: Catalog) -> Self {
        let scene = compose_city(&catalog);
        Self {
            catalog,
            scene,
            camera: MapCamera::new(),
            chat: ChatController::new(),
            selection: Selection::new(),
            hovered: None,
            sidebar_open: true,
            viewport: DEFAULT_VIEWPORT,
            frame: Frame::new(0, DEFAULT_DT_S),
            events: EventBus::new(),
        }
    }

    /// Session over the built-in Austin map.
    pub fn austin() -> Self {
        Self::new(catalog::austin::austin_landmarks())
    }

    pub fn resize(&mut self, width_px: f64, height_px: f64) {
        if width_px > 0.0 && height_px > 0.0 {
            self.viewport = (width_px, height_px);
        }
    }

    /// Update the hover state from a pointer position.
    pub fn pointer_moved(&mut self, x_px: f64, y_px: f64) {
        self.hovered = self.pick(x_px, y_px).map(|hit| hit.entity);
    }

    /// A click: the topmost landmark under the pointer (if any) is
    /// selected and its context request issued.
    pub fn pointer_clicked(&mut self, x_px: f64, y_px: f64) -> Option<PendingPrompt> {
        let hit = self.pick(x_px, y_px)?;
        self.select_index(hit.landmark_index)
    }

    /// Programmatic selection by landmark id.
    pub fn select_landmark(&mut self, id: &str) -> Option<PendingPrompt> {
        let index = self.catalog.index_of(id)?;
        self.select_index(index)
    }

    /// Clears the selection. The camera stays where it is.
    pub fn close_selection(&mut self) {
        if self.selection.clear().is_some() {
            self.events.emit(self.frame, "selection", "closed");
        }
    }

    /// Free-text send; `None` for empty input or while a reply is
    /// outstanding.
    pub fn submit_input(&mut self, input: &str) -> Option<PendingPrompt> {
        let pending = self.chat.submit(input)?;
        self.events.emit(self.frame, "chat", "user message sent");
        Some(pending)
    }

    /// Feed a gateway reply back into the transcript.
    pub fn resolve_chat(&mut self, ticket: u64, text: impl Into<String>) -> bool {
        let applied = self.chat.resolve(ticket, text);
        if applied {
            self.events.emit(self.frame, "chat", "reply appended");
        }
        applied
    }

    /// Per-frame tick: landmark animation and camera smoothing.
    pub fn tick(&mut self, dt_s: f64) {
        self.frame = Frame::at_time(self.frame.index + 1, dt_s, self.frame.time.0 + dt_s);
        animate_landmarks(
            &mut self.scene.world,
            &self.catalog,
            self.frame,
            self.selection.current(),
        );
        self.camera.update(dt_s);
    }

    pub fn orbit(&mut self, d_yaw: f64, d_pitch: f64) {
        self.camera.orbit(d_yaw, d_pitch);
    }

    pub fn wheel_zoom(&mut self, delta: f64) {
        self.camera.wheel_zoom(delta);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.chat.messages()
    }

    pub fn is_loading(&self) -> bool {
        self.chat.is_awaiting()
    }

    pub fn selected_record(&self) -> Option<&LandmarkRecord> {
        let entity = self.selection.current()?;
        self.record_for(entity)
    }

    pub fn hovered_record(&self) -> Option<&LandmarkRecord> {
        self.record_for(self.hovered?)
    }

    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open
    }

    pub fn set_sidebar_open(&mut self, open: bool) {
        self.sidebar_open = open;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    pub fn camera(&self) -> &MapCamera {
        &self.camera
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    /// Frame state for the external renderer: every visible drawable
    /// with hover/selection materials applied, plus the labels that
    /// are visible right now (hovered or selected).
    pub fn snapshot(&self) -> RenderSnapshot {
        let mut meshes = Vec::new();
        for (entity, transform, drawable) in self.scene.world.drawables_3d() {
            let drawable = match self.scene.world.landmark_ref(entity) {
                Some(landmark) => Drawable3D {
                    shape: drawable.shape,
                    material: display_material(
                        &self.catalog.records()[landmark.index],
                        self.hovered == Some(entity),
                        self.selection.is_selected(entity),
                    ),
                },
                None => drawable,
            };
            meshes.push(RenderMesh {
                position: transform.position,
                yaw_rad: transform.yaw_rad,
                drawable,
            });
        }

        let mut labels = Vec::new();
        for (entity, _) in self.scene.world.landmark_entities() {
            if self.hovered != Some(entity) && !self.selection.is_selected(entity) {
                continue;
            }
            if let Some(label) = self.scene.world.label(entity) {
                labels.push(RenderLabel {
                    text: label.text.clone(),
                    position: label.anchor,
                });
            }
        }

        RenderSnapshot {
            meshes,
            labels,
            camera: RenderCamera {
                position: self.camera.position,
                target: self.camera.target,
                fov_y_deg: self.camera.fov_y_deg,
            },
            environment: self.scene.environment.clone(),
        }
    }

    fn pick(&self, x_px: f64, y_px: f64) -> Option<PickHit> {
        let (width, height) = self.viewport;
        let ray = self.camera.screen_ray(x_px, y_px, width, height)?;
        pick_ray(&self.scene.world, ray, PickOptions::default())
    }

    fn select_index(&mut self, index: usize) -> Option<PendingPrompt> {
        let spawned = *self.scene.landmarks.get(index)?;
        let record = self.catalog.records().get(index)?.clone();

        self.selection.select(spawned.primary);
        self.sidebar_open = true;
        self.camera.frame_landmark(&record);
        self.events.emit(self.frame, "selection", record.id.clone());
        Some(self.chat.select_landmark(&record))
    }

    fn record_for(&self, entity: EntityId) -> Option<&LandmarkRecord> {
        let landmark = self.scene.world.landmark_ref(entity)?;
        self.catalog.records().get(landmark.index)
    }
}

#[cfg(test)]
mod tests {
    use super::GuideSession;
    use crate::chat::Role;
    use crate::persona::FALLBACK_REPLY;
    use foundation::math::Vec3;

    #[test]
    fn starts_with_welcome_open_sidebar_and_no_selection() {
        let session = GuideSession::austin();
        assert!(session.sidebar_open());
        assert!(!session.is_loading());
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.selected_record(), None);
    }

    #[test]
    fn selecting_frames_the_camera_and_opens_the_sidebar() {
        let mut session = GuideSession::austin();
        session.set_sidebar_open(false);

        let pending = session.select_landmark("capitol").unwrap();
        assert!(session.sidebar_open());
        assert!(session.is_loading());
        assert_eq!(session.selected_record().unwrap().id, "capitol");
        assert!(pending.prompt.contains("Texas State Capitol"));

        // offset = 2 * 6 + 15 = 27 for the capitol's [4, 6, 4] scale.
        assert_eq!(session.camera().target, Vec3::new(0.0, 0.0, -10.0));
        assert_eq!(session.camera().position, Vec3::new(27.0, 27.0, 17.0));
    }

    #[test]
    fn closing_the_selection_does_not_move_the_camera() {
        let mut session = GuideSession::austin();
        session.select_landmark("frost-tower");

        let before = session.camera().clone();
        session.close_selection();
        assert_eq!(session.selected_record(), None);
        assert_eq!(session.camera(), &before);
    }

    #[test]
    fn pointer_over_the_framed_landmark_hovers_and_clicks_it() {
        let mut session = GuideSession::austin();
        session.select_landmark("capitol");

        // The framed camera looks straight at the capitol, so the
        // viewport center ray must hit it.
        session.pointer_moved(640.0, 360.0);
        assert_eq!(session.hovered_record().unwrap().id, "capitol");

        let pending = session.pointer_clicked(640.0, 360.0).unwrap();
        assert!(pending.prompt.contains("Texas State Capitol"));
    }

    #[test]
    fn click_on_empty_sky_selects_nothing() {
        let mut session = GuideSession::austin();
        // Top-left corner from the default camera looks at sky.
        assert!(session.pointer_clicked(0.0, 0.0).is_none());
        assert_eq!(session.selected_record(), None);
    }

    #[test]
    fn submit_and_resolve_round_trip() {
        let mut session = GuideSession::austin();
        let pending = session.submit_input("where to hear live music?").unwrap();
        assert!(session.is_loading());

        assert!(session.resolve_chat(pending.ticket, "Try the Continental Club."));
        assert!(!session.is_loading());

        let last = session.messages().last().unwrap();
        assert_eq!(last.role, Role::Model);
        assert_eq!(last.text, "Try the Continental Club.");
    }

    #[test]
    fn selection_while_loading_replaces_the_outstanding_request() {
        let mut session = GuideSession::austin();
        let stale = session.submit_input("first question").unwrap();
        let fresh = session.select_landmark("zilker").unwrap();

        assert!(!session.resolve_chat(stale.ticket, "too late"));
        assert!(session.is_loading());
        assert!(session.resolve_chat(fresh.ticket, FALLBACK_REPLY));
        assert!(!session.is_loading());
    }

    #[test]
    fn labels_are_visible_exactly_for_hover_or_selection() {
        let mut session = GuideSession::austin();
        assert!(session.snapshot().labels.is_empty());

        session.select_landmark("moody-center");
        let labels = session.snapshot().labels;
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].text, "Moody Center");

        session.close_selection();
        assert!(session.snapshot().labels.is_empty());
    }

    #[test]
    fn snapshot_applies_the_selection_glow() {
        let mut session = GuideSession::austin();
        session.select_landmark("frost-tower");

        let glowing = session
            .snapshot()
            .meshes
            .iter()
            .filter(|m| m.drawable.material.emissive_intensity > 0.0)
            .count();
        assert_eq!(glowing, 1);
    }

    #[test]
    fn tick_spins_the_selected_landmark() {
        let mut session = GuideSession::austin();
        session.select_landmark("capitol");

        session.tick(0.1);
        session.tick(0.1);

        let spinning = session
            .snapshot()
            .meshes
            .iter()
            .filter(|m| m.yaw_rad != 0.0)
            .count();
        assert_eq!(spinning, 1);
    }
}
