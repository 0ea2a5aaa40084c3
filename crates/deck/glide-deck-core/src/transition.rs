//! Transition engine: plans and runs the slide-to-slide visual effects.
//!
//! A run is START -> (phases of concurrent animations) -> SETTLE -> DONE.
//! Every type except `flip` is a single concurrent phase; `flip` exits the
//! departing slide over half the duration, then enters the arriving one over
//! the remaining half. Keyframes are pure functions of (type, direction),
//! kept in one table below. Runs are fire-and-forget relative to the deck
//! state update: the deck never awaits them, and overlapping runs are
//! neither queued nor cancelled.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::ids::{ElementId, GroupId, IdAllocator, RunId};
use crate::stage::{Stage, StageOp};
use crate::style::{Keyframe, Marker, Origin};
use crate::timeline::Timeline;

/// Visual effect between two slides.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    None,
    Fade,
    #[default]
    Slide,
    Zoom,
    Flip,
    Cube,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Per-navigation transition parameters; constructed per call, not persisted.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionOptions {
    pub duration_ms: u32,
    pub easing: Easing,
    pub direction: Direction,
}

/// One element's keyframe pair within a phase.
struct AnimSpec {
    element: ElementId,
    from: Keyframe,
    to: Keyframe,
    duration_ms: u32,
}

/// A set of concurrent animations with stage writes around them.
struct PhaseSpec {
    prelude: Vec<StageOp>,
    anims: Vec<AnimSpec>,
    settle: Vec<StageOp>,
}

struct TransitionPlan {
    prelude: Vec<StageOp>,
    phases: Vec<PhaseSpec>,
}

const PERSPECTIVE_PX: f32 = 1200.0;
const CUBE_DEPTH_VW: f32 = -50.0;
const CUBE_REST_OPACITY: f32 = 0.6;

/// Stage writes that put the departing slide fully out of the scene.
fn exit_settle(from: ElementId) -> Vec<StageOp> {
    vec![
        StageOp::Style(from, crate::style::StyleProp::Opacity, 0.0),
        StageOp::Marker(from, Marker::Interactive, false),
        StageOp::Marker(from, Marker::Active, false),
    ]
}

/// Keyframe table, keyed by (type, direction). `from` is the departing
/// element when one exists.
fn plan(
    kind: TransitionKind,
    from: Option<ElementId>,
    to: ElementId,
    container: ElementId,
    opts: &TransitionOptions,
) -> TransitionPlan {
    use crate::style::StyleProp::*;
    let duration = opts.duration_ms;
    let forward = opts.direction == Direction::Forward;

    match kind {
        TransitionKind::None => {
            // Immediate swap; the caller applies the prelude synchronously.
            let mut prelude = Vec::new();
            if let Some(from) = from {
                prelude.extend(exit_settle(from));
            }
            prelude.push(StageOp::Style(to, Opacity, 1.0));
            prelude.push(StageOp::Marker(to, Marker::Interactive, true));
            prelude.push(StageOp::Marker(to, Marker::Active, true));
            TransitionPlan {
                prelude,
                phases: Vec::new(),
            }
        }
        TransitionKind::Fade => {
            let prelude = vec![
                StageOp::Style(to, Opacity, 0.0),
                StageOp::Marker(to, Marker::Interactive, true),
                StageOp::Marker(to, Marker::Active, true),
            ];
            let mut anims = vec![AnimSpec {
                element: to,
                from: Keyframe::new().opacity(0.0),
                to: Keyframe::new().opacity(1.0),
                duration_ms: duration,
            }];
            let mut settle = Vec::new();
            if let Some(from) = from {
                anims.push(AnimSpec {
                    element: from,
                    from: Keyframe::new().opacity(1.0),
                    to: Keyframe::new().opacity(0.0),
                    duration_ms: duration,
                });
                settle.extend(exit_settle(from));
            }
            settle.push(StageOp::Style(to, Opacity, 1.0));
            TransitionPlan {
                prelude: Vec::new(),
                phases: vec![PhaseSpec {
                    prelude,
                    anims,
                    settle,
                }],
            }
        }
        TransitionKind::Slide => {
            let enter_offset = if forward { 100.0 } else { -100.0 };
            let exit_offset = -enter_offset;
            let prelude = vec![
                StageOp::Style(to, Opacity, 1.0),
                StageOp::Marker(to, Marker::Interactive, true),
                StageOp::Marker(to, Marker::Active, true),
            ];
            let mut anims = vec![AnimSpec {
                element: to,
                from: Keyframe::new().translate_x(enter_offset),
                to: Keyframe::new().translate_x(0.0),
                duration_ms: duration,
            }];
            let mut settle = Vec::new();
            if let Some(from) = from {
                anims.push(AnimSpec {
                    element: from,
                    from: Keyframe::new().translate_x(0.0),
                    to: Keyframe::new().translate_x(exit_offset),
                    duration_ms: duration,
                });
                settle.extend(exit_settle(from));
                settle.push(StageOp::Style(from, TranslateX, 0.0));
            }
            settle.push(StageOp::Style(to, TranslateX, 0.0));
            TransitionPlan {
                prelude: Vec::new(),
                phases: vec![PhaseSpec {
                    prelude,
                    anims,
                    settle,
                }],
            }
        }
        TransitionKind::Zoom => {
            let enter_from = if forward { 0.8 } else { 1.2 };
            let exit_to = if forward { 1.2 } else { 0.8 };
            let prelude = vec![
                StageOp::Style(to, Opacity, 0.0),
                StageOp::Marker(to, Marker::Interactive, true),
                StageOp::Marker(to, Marker::Active, true),
            ];
            let mut anims = vec![AnimSpec {
                element: to,
                from: Keyframe::new().scale(enter_from).opacity(0.0),
                to: Keyframe::new().scale(1.0).opacity(1.0),
                duration_ms: duration,
            }];
            let mut settle = Vec::new();
            if let Some(from) = from {
                anims.push(AnimSpec {
                    element: from,
                    from: Keyframe::new().scale(1.0).opacity(1.0),
                    to: Keyframe::new().scale(exit_to).opacity(0.0),
                    duration_ms: duration,
                });
                settle.extend(exit_settle(from));
                settle.push(StageOp::Style(from, Scale, 1.0));
            }
            settle.push(StageOp::Style(to, Opacity, 1.0));
            settle.push(StageOp::Style(to, Scale, 1.0));
            TransitionPlan {
                prelude: Vec::new(),
                phases: vec![PhaseSpec {
                    prelude,
                    anims,
                    settle,
                }],
            }
        }
        TransitionKind::Flip => {
            let enter_angle = if forward { -180.0 } else { 180.0 };
            let exit_angle = -enter_angle;
            let half = (duration / 2).max(1);
            let mut phases = Vec::new();
            if let Some(from) = from {
                let mut settle = exit_settle(from);
                settle.push(StageOp::Style(from, RotateY, 0.0));
                phases.push(PhaseSpec {
                    prelude: Vec::new(),
                    anims: vec![AnimSpec {
                        element: from,
                        from: Keyframe::new().rotate_y(0.0).opacity(1.0),
                        to: Keyframe::new().rotate_y(exit_angle).opacity(0.0),
                        duration_ms: half,
                    }],
                    settle,
                });
            }
            phases.push(PhaseSpec {
                prelude: vec![
                    StageOp::Marker(to, Marker::Interactive, true),
                    StageOp::Marker(to, Marker::Active, true),
                ],
                anims: vec![AnimSpec {
                    element: to,
                    from: Keyframe::new().rotate_y(enter_angle).opacity(0.0),
                    to: Keyframe::new().rotate_y(0.0).opacity(1.0),
                    duration_ms: half,
                }],
                settle: vec![
                    StageOp::Style(to, Opacity, 1.0),
                    StageOp::Style(to, RotateY, 0.0),
                ],
            });
            TransitionPlan {
                prelude: vec![StageOp::Style(container, Perspective, PERSPECTIVE_PX)],
                phases,
            }
        }
        TransitionKind::Cube => {
            let enter_rotate = if forward { 90.0 } else { -90.0 };
            let exit_rotate = -enter_rotate;
            let (enter_origin, exit_origin) = if forward {
                (Origin::LeftCenter, Origin::RightCenter)
            } else {
                (Origin::RightCenter, Origin::LeftCenter)
            };
            let mut prelude = vec![
                StageOp::Style(container, Perspective, PERSPECTIVE_PX),
                StageOp::Marker(to, Marker::Interactive, true),
                StageOp::Marker(to, Marker::Active, true),
                StageOp::Origin(to, enter_origin),
            ];
            let mut anims = vec![AnimSpec {
                element: to,
                from: Keyframe::new()
                    .translate_z(CUBE_DEPTH_VW)
                    .rotate_y(enter_rotate)
                    .opacity(CUBE_REST_OPACITY),
                to: Keyframe::new().translate_z(0.0).rotate_y(0.0).opacity(1.0),
                duration_ms: duration,
            }];
            let mut settle = vec![
                StageOp::Style(to, Opacity, 1.0),
                StageOp::Style(to, TranslateZ, 0.0),
                StageOp::Style(to, RotateY, 0.0),
                StageOp::Origin(to, Origin::Center),
            ];
            if let Some(from) = from {
                prelude.push(StageOp::Origin(from, exit_origin));
                anims.push(AnimSpec {
                    element: from,
                    from: Keyframe::new().translate_z(0.0).rotate_y(0.0).opacity(1.0),
                    to: Keyframe::new()
                        .translate_z(CUBE_DEPTH_VW)
                        .rotate_y(exit_rotate)
                        .opacity(CUBE_REST_OPACITY),
                    duration_ms: duration,
                });
                settle.extend(exit_settle(from));
                settle.push(StageOp::Style(from, TranslateZ, 0.0));
                settle.push(StageOp::Style(from, RotateY, 0.0));
                settle.push(StageOp::Origin(from, Origin::Center));
            }
            TransitionPlan {
                prelude,
                phases: vec![PhaseSpec {
                    prelude: Vec::new(),
                    anims,
                    settle,
                }],
            }
        }
    }
}

/// An in-flight transition run.
struct ActiveRun {
    id: RunId,
    easing: Easing,
    phases: std::collections::VecDeque<PhaseSpec>,
    current_group: Option<GroupId>,
}

/// Tracks every in-flight run. Does not queue, cancel or reject overlap:
/// a second `begin` mid-run starts an independent run on top of whatever
/// visual state currently exists.
#[derive(Default)]
pub struct TransitionEngine {
    runs: Vec<ActiveRun>,
    reduced_motion: bool,
}

impl TransitionEngine {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            runs: Vec::new(),
            reduced_motion,
        }
    }

    /// Start a transition from `from` (optional) to `to`. Returns the run id,
    /// or `None` when the effective type is `none` and the swap resolved
    /// synchronously.
    #[allow(clippy::too_many_arguments)]
    pub fn begin(
        &mut self,
        ids: &mut IdAllocator,
        timeline: &mut Timeline,
        stage: &mut Stage,
        kind: TransitionKind,
        from: Option<ElementId>,
        to: ElementId,
        container: ElementId,
        opts: &TransitionOptions,
    ) -> Option<RunId> {
        let effective = if self.reduced_motion {
            TransitionKind::None
        } else {
            kind
        };
        let plan = plan(effective, from, to, container, opts);
        stage.apply_all(&plan.prelude);
        if plan.phases.is_empty() {
            return None;
        }
        let mut run = ActiveRun {
            id: ids.alloc_run(),
            easing: opts.easing,
            phases: plan.phases.into(),
            current_group: None,
        };
        start_next_phase(&mut run, ids, timeline, stage);
        let id = run.id;
        if run.current_group.is_some() {
            self.runs.push(run);
            Some(id)
        } else {
            // Every phase settled synchronously (no animations planned).
            None
        }
    }

    /// Advance runs whose current phase group completed during this tick.
    pub fn on_groups_finished(
        &mut self,
        finished: &[GroupId],
        ids: &mut IdAllocator,
        timeline: &mut Timeline,
        stage: &mut Stage,
    ) {
        if finished.is_empty() {
            return;
        }
        let mut runs = std::mem::take(&mut self.runs);
        runs.retain_mut(|run| {
            if !matches!(run.current_group, Some(g) if finished.contains(&g)) {
                return true;
            }
            run.current_group = None;
            start_next_phase(run, ids, timeline, stage);
            run.current_group.is_some()
        });
        self.runs = runs;
    }

    /// Number of runs still animating.
    pub fn active_runs(&self) -> usize {
        self.runs.len()
    }
}

/// Pop phases until one actually animates; applies each popped phase's
/// prelude immediately and each exhausted phase's settle.
fn start_next_phase(
    run: &mut ActiveRun,
    ids: &mut IdAllocator,
    timeline: &mut Timeline,
    stage: &mut Stage,
) {
    while let Some(phase) = run.phases.pop_front() {
        stage.apply_all(&phase.prelude);
        if phase.anims.is_empty() {
            stage.apply_all(&phase.settle);
            continue;
        }
        let mut members = Vec::with_capacity(phase.anims.len());
        for spec in &phase.anims {
            members.push(timeline.start(
                ids,
                stage,
                spec.element,
                spec.from.clone(),
                spec.to.clone(),
                spec.duration_ms,
                run.easing,
            ));
        }
        run.current_group = Some(timeline.group(ids, &members));
        // Settle ops stay with the run until the group completes.
        run.phases.push_front(PhaseSpec {
            prelude: Vec::new(),
            anims: Vec::new(),
            settle: phase.settle,
        });
        return;
    }
}
