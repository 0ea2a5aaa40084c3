//! Animation primitive: a single element run through a timed keyframe
//! interpolation, plus fan-in groups over several of them.
//!
//! The timeline is the only suspension point in the system. It owns no
//! clock; the deck advances it with `tick(dt_ms, ..)` and every higher-level
//! wait (transition phases) composes group completion. Cancellation is
//! success-shaped: a cancelled animation applies its fill and completes.

use crate::easing::Easing;
use crate::ids::{AnimationId, ElementId, GroupId, IdAllocator};
use crate::stage::Stage;
use crate::style::{lerp_f32, Keyframe};

/// One in-flight keyframe interpolation (fill-mode forwards).
#[derive(Debug)]
struct Animation {
    id: AnimationId,
    element: ElementId,
    from: Keyframe,
    to: Keyframe,
    duration_ms: f32,
    easing: Easing,
    elapsed_ms: f32,
    finished: bool,
}

impl Animation {
    /// Write the eased interpolation at the current time into the stage.
    /// At t >= 1 this lands exactly on the `to` keyframe.
    fn write(&self, stage: &mut Stage) {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        let eased = self.easing.eval(t);
        for (prop, to_value) in self.to.props() {
            // `from` is normalized at start time; missing props fall back to
            // the target value (no movement on that channel).
            let from_value = self.from.get(prop).unwrap_or(to_value);
            stage.set_style(self.element, prop, lerp_f32(from_value, to_value, eased));
        }
    }
}

#[derive(Debug)]
struct Group {
    id: GroupId,
    remaining: usize,
}

/// Owns all active animations and fan-in groups; advanced by the deck tick.
#[derive(Debug, Default)]
pub struct Timeline {
    animations: Vec<Animation>,
    groups: Vec<Group>,
    memberships: Vec<(AnimationId, GroupId)>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a timed interpolation on `element`. Properties present in `to`
    /// but absent in `from` are captured from the element's current style,
    /// so sparse keyframes behave like implicit starting frames. The `from`
    /// frame is written immediately; interpolation begins on the next tick.
    pub fn start(
        &mut self,
        ids: &mut IdAllocator,
        stage: &mut Stage,
        element: ElementId,
        from: Keyframe,
        to: Keyframe,
        duration_ms: u32,
        easing: Easing,
    ) -> AnimationId {
        let id = ids.alloc_animation();
        let mut from = from;
        for (prop, _) in to.props() {
            if from.get(prop).is_none() {
                from.set(prop, stage.style(element, prop));
            }
        }
        let anim = Animation {
            id,
            element,
            from,
            to,
            duration_ms: duration_ms as f32,
            easing,
            elapsed_ms: 0.0,
            finished: false,
        };
        anim.write(stage);
        self.animations.push(anim);
        id
    }

    /// Cancel an animation: apply its fill (the `to` keyframe) and complete
    /// it. Callers cannot distinguish this from a natural finish.
    pub fn cancel(&mut self, stage: &mut Stage, id: AnimationId) {
        let Some(anim) = self
            .animations
            .iter_mut()
            .find(|a| a.id == id && !a.finished)
        else {
            return;
        };
        anim.elapsed_ms = anim.duration_ms;
        anim.write(stage);
        anim.finished = true;
        self.note_finished(id);
        self.animations.retain(|a| !a.finished);
    }

    /// Fan-in: a group completes once every member animation has completed.
    /// A group over no animations completes on the next tick.
    pub fn group(&mut self, ids: &mut IdAllocator, members: &[AnimationId]) -> GroupId {
        let id = ids.alloc_group();
        let live = members
            .iter()
            .filter(|m| self.animations.iter().any(|a| a.id == **m && !a.finished))
            .count();
        for m in members {
            self.memberships.push((*m, id));
        }
        self.groups.push(Group {
            id,
            remaining: live,
        });
        id
    }

    /// Advance all animations by `dt_ms`, writing interpolated values into
    /// the stage, and return the groups that completed during this tick.
    /// Animations are advanced in start order, so when overlapping runs
    /// touch the same property the later-started run's write lands last.
    pub fn tick(&mut self, dt_ms: f32, stage: &mut Stage) -> Vec<GroupId> {
        let mut newly_finished: Vec<AnimationId> = Vec::new();
        for anim in &mut self.animations {
            if anim.finished {
                continue;
            }
            anim.elapsed_ms += dt_ms;
            anim.write(stage);
            if anim.elapsed_ms >= anim.duration_ms {
                anim.finished = true;
                newly_finished.push(anim.id);
            }
        }
        self.animations.retain(|a| !a.finished);

        for id in newly_finished {
            self.note_finished(id);
        }

        let mut done = Vec::new();
        self.groups.retain(|g| {
            if g.remaining == 0 {
                done.push(g.id);
                false
            } else {
                true
            }
        });
        if !done.is_empty() {
            self.memberships
                .retain(|(_, group)| !done.contains(group));
        }
        done
    }

    pub fn active_animations(&self) -> usize {
        self.animations.iter().filter(|a| !a.finished).count()
    }

    fn note_finished(&mut self, id: AnimationId) {
        for (member, group) in &self.memberships {
            if *member == id {
                if let Some(g) = self.groups.iter_mut().find(|g| g.id == *group) {
                    g.remaining = g.remaining.saturating_sub(1);
                }
            }
        }
        self.memberships.retain(|(member, _)| *member != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::StyleProp;

    fn setup() -> (IdAllocator, Stage, Timeline, ElementId) {
        let mut ids = IdAllocator::new();
        let mut stage = Stage::new();
        let el = stage.alloc_element(&mut ids);
        (ids, stage, Timeline::new(), el)
    }

    #[test]
    fn fill_forwards_lands_exactly_on_target() {
        let (mut ids, mut stage, mut timeline, el) = setup();
        timeline.start(
            &mut ids,
            &mut stage,
            el,
            Keyframe::new().opacity(0.0),
            Keyframe::new().opacity(1.0),
            100,
            Easing::Linear,
        );
        timeline.tick(50.0, &mut stage);
        let mid = stage.style(el, StyleProp::Opacity);
        assert!(mid > 0.0 && mid < 1.0, "mid={mid}");
        timeline.tick(75.0, &mut stage); // overshoot clamps to the target
        assert_eq!(stage.style(el, StyleProp::Opacity), 1.0);
        assert_eq!(timeline.active_animations(), 0);
    }

    #[test]
    fn group_completes_only_when_all_members_finish() {
        let (mut ids, mut stage, mut timeline, el) = setup();
        let a = timeline.start(
            &mut ids,
            &mut stage,
            el,
            Keyframe::new().opacity(1.0),
            Keyframe::new().opacity(0.0),
            100,
            Easing::Linear,
        );
        let b = timeline.start(
            &mut ids,
            &mut stage,
            el,
            Keyframe::new().translate_x(100.0),
            Keyframe::new().translate_x(0.0),
            200,
            Easing::Linear,
        );
        let group = timeline.group(&mut ids, &[a, b]);
        assert!(timeline.tick(100.0, &mut stage).is_empty()); // a done, b not
        let done = timeline.tick(100.0, &mut stage);
        assert_eq!(done, vec![group]);
    }

    #[test]
    fn cancel_is_success_shaped() {
        let (mut ids, mut stage, mut timeline, el) = setup();
        let a = timeline.start(
            &mut ids,
            &mut stage,
            el,
            Keyframe::new().opacity(0.0),
            Keyframe::new().opacity(1.0),
            1000,
            Easing::Linear,
        );
        let group = timeline.group(&mut ids, &[a]);
        timeline.cancel(&mut stage, a);
        assert_eq!(stage.style(el, StyleProp::Opacity), 1.0); // fill applied
        assert_eq!(timeline.tick(0.0, &mut stage), vec![group]);
    }

    #[test]
    fn empty_group_completes_on_next_tick() {
        let (mut ids, mut stage, mut timeline, _el) = setup();
        let group = timeline.group(&mut ids, &[]);
        assert_eq!(timeline.tick(16.0, &mut stage), vec![group]);
    }

    #[test]
    fn implicit_from_captures_current_style() {
        let (mut ids, mut stage, mut timeline, el) = setup();
        stage.set_style(el, StyleProp::Opacity, 0.25);
        timeline.start(
            &mut ids,
            &mut stage,
            el,
            Keyframe::new(),
            Keyframe::new().opacity(1.0),
            100,
            Easing::Linear,
        );
        timeline.tick(50.0, &mut stage);
        let v = stage.style(el, StyleProp::Opacity);
        assert!((v - 0.625).abs() < 1e-4, "v={v}");
    }
}
