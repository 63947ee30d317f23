use crate::components::{
    ComponentBounds, Drawable3D, Label, LandmarkRef, Transform, Visibility,
};
use crate::entity::EntityId;
use foundation::handles::Handle;

#[derive(Debug, Default)]
pub struct World {
    next_index: u32,
    transforms: Vec<Option<Transform>>,
    bounds: Vec<Option<ComponentBounds>>,
    visibility: Vec<Option<Visibility>>,
    drawables_3d: Vec<Option<Drawable3D>>,
    labels: Vec<Option<Label>>,
    landmark_refs: Vec<Option<LandmarkRef>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> EntityId {
        let id = EntityId(Handle::new(self.next_index, 0));
        self.next_index += 1;
        let idx = id.index() as usize;
        self.ensure_capacity(idx);
        id
    }

    pub fn set_transform(&mut self, entity: EntityId, transform: Transform) {
        self.ensure_capacity(entity.index() as usize);
        self.transforms[entity.index() as usize] = Some(transform);
    }

    pub fn set_bounds(&mut self, entity: EntityId, bounds: ComponentBounds) {
        self.ensure_capacity(entity.index() as usize);
        self.bounds[entity.index() as usize] = Some(bounds);
    }

    pub fn set_visibility(&mut self, entity: EntityId, visibility: Visibility) {
        self.ensure_capacity(entity.index() as usize);
        self.visibility[entity.index() as usize] = Some(visibility);
    }

    pub fn set_drawable_3d(&mut self, entity: EntityId, drawable: Drawable3D) {
        self.ensure_capacity(entity.index() as usize);
        self.drawables_3d[entity.index() as usize] = Some(drawable);
    }

    pub fn set_label(&mut self, entity: EntityId, label: Label) {
        self.ensure_capacity(entity.index() as usize);
        self.labels[entity.index() as usize] = Some(label);
    }

    pub fn set_landmark_ref(&mut self, entity: EntityId, landmark: LandmarkRef) {
        self.ensure_capacity(entity.index() as usize);
        self.landmark_refs[entity.index() as usize] = Some(landmark);
    }

    pub fn transform(&self, entity: EntityId) -> Option<Transform> {
        self.transforms.get(entity.index() as usize).and_then(|t| *t)
    }

    /// Mutable transform access for the per-frame animation pass.
    pub fn transform_mut(&mut self, entity: EntityId) -> Option<&mut Transform> {
        self.transforms
            .get_mut(entity.index() as usize)
            .and_then(|t| t.as_mut())
    }

    pub fn bounds(&self, entity: EntityId) -> Option<ComponentBounds> {
        self.bounds.get(entity.index() as usize).and_then(|b| *b)
    }

    pub fn drawable_3d(&self, entity: EntityId) -> Option<Drawable3D> {
        self.drawables_3d
            .get(entity.index() as usize)
            .and_then(|d| *d)
    }

    pub fn label(&self, entity: EntityId) -> Option<&Label> {
        self.labels
            .get(entity.index() as usize)
            .and_then(|l| l.as_ref())
    }

    pub fn landmark_ref(&self, entity: EntityId) -> Option<LandmarkRef> {
        self.landmark_refs
            .get(entity.index() as usize)
            .and_then(|l| *l)
    }

    /// Visible drawables in ascending entity-index order.
    pub fn drawables_3d(&self) -> Vec<(EntityId, Transform, Drawable3D)> {
        let mut out = Vec::new();
        for (idx, drawable) in self.drawables_3d.iter().enumerate() {
            let Some(drawable) = drawable else { continue };
            let Some(transform) = self.transforms.get(idx).and_then(|t| *t) else {
                continue;
            };
            let visible = self
                .visibility
                .get(idx)
                .and_then(|v| *v)
                .map(|v| v.visible)
                .unwrap_or(true);
            if !visible {
                continue;
            }

            out.push((EntityId(Handle::new(idx as u32, 0)), transform, *drawable));
        }
        out
    }

    /// Pickable landmark entities in ascending entity-index order.
    pub fn landmark_entities(&self) -> Vec<(EntityId, LandmarkRef)> {
        let mut out = Vec::new();
        for (idx, landmark) in self.landmark_refs.iter().enumerate() {
            let Some(landmark) = landmark else { continue };
            let visible = self
                .visibility
                .get(idx)
                .and_then(|v| *v)
                .map(|v| v.visible)
                .unwrap_or(true);
            if !visible {
                continue;
            }
            out.push((EntityId(Handle::new(idx as u32, 0)), *landmark));
        }
        out
    }

    fn ensure_capacity(&mut self, idx: usize) {
        if self.transforms.len() <= idx {
            let new_len = idx + 1;
            self.transforms.resize(new_len, None);
            self.bounds.resize(new_len, None);
            self.visibility.resize(new_len, None);
            self.drawables_3d.resize(new_len, None);
            self.labels.resize(new_len, None);
            self.landmark_refs.resize(new_len, None);
        }
    }
}
