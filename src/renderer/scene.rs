//! Scene painter
//!
//! Paint order: background, clouds, player, projectiles, hostiles.
//! Dead entities are skipped.

use glam::Vec2;

use super::DrawContext;
use crate::Color;
use crate::error::RenderError;
use crate::sim::{Entity, EntityKind, GameState};

const SKY_TOP: Color = Color::rgb(0x87, 0xCE, 0xEB);
const SKY_BOTTOM: Color = Color::rgb(0xE0, 0xF6, 0xFF);
const CLOUD: Color = Color::WHITE.with_alpha(0.6);
/// Left anchor of each cloud
const CLOUD_ANCHORS: [Vec2; 3] = [Vec2::new(100.0, 80.0), Vec2::new(400.0, 150.0), Vec2::new(650.0, 100.0)];

const PLAYER_FUSELAGE: Color = Color::rgb(0x2E, 0x5C, 0x8A);
const HOSTILE_MARKER: Color = Color::rgb(0xFF, 0x00, 0x00);

type Painter = fn(&mut dyn DrawContext, &Entity) -> Result<(), RenderError>;

fn painter(kind: EntityKind) -> Painter {
    match kind {
        EntityKind::Controlled => paint_player,
        EntityKind::Projectile => paint_projectile,
        EntityKind::Hostile(_) => paint_hostile,
    }
}

/// Draw one full frame of `state`
pub fn draw_scene(ctx: &mut dyn DrawContext, state: &GameState) -> Result<(), RenderError> {
    let size = state.playfield;
    ctx.clear(size.x, size.y)?;
    ctx.fill_vertical_gradient(Vec2::ZERO, size, SKY_TOP, SKY_BOTTOM)?;
    draw_clouds(&mut *ctx)?;

    let player = std::iter::once(&state.player.body);
    for e in player
        .chain(&state.projectiles)
        .chain(&state.hostiles)
        .filter(|e| e.is_alive())
    {
        let paint = painter(e.kind);
        paint(&mut *ctx, e)?;
    }
    Ok(())
}

fn draw_clouds(ctx: &mut dyn DrawContext) -> Result<(), RenderError> {
    for anchor in CLOUD_ANCHORS {
        let puffs = [
            (anchor, 30.0),
            (anchor + Vec2::new(25.0, 0.0), 35.0),
            (anchor + Vec2::new(50.0, 0.0), 30.0),
        ];
        ctx.fill_circles(&puffs, CLOUD)?;
    }
    Ok(())
}

/// Upward triangle with a fuselage and a cockpit window
fn paint_player(ctx: &mut dyn DrawContext, e: &Entity) -> Result<(), RenderError> {
    let c = e.center();
    let (x, y, w, h) = (e.pos.x, e.pos.y, e.size.x, e.size.y);
    ctx.fill_polygon(
        &[Vec2::new(c.x, y), Vec2::new(x, y + h), Vec2::new(x + w, y + h)],
        e.color,
    )?;
    ctx.fill_rect(Vec2::new(c.x - 8.0, c.y), Vec2::new(16.0, h / 2.0), PLAYER_FUSELAGE)?;
    ctx.fill_circles(&[(Vec2::new(c.x, c.y - 5.0), 8.0)], Color::WHITE)
}

/// Ellipse with a highlight toward the upper left
fn paint_projectile(ctx: &mut dyn DrawContext, e: &Entity) -> Result<(), RenderError> {
    let c = e.center();
    ctx.fill_ellipse(c, e.size / 2.0, e.color)?;
    ctx.fill_ellipse(c + Vec2::new(-1.0, -3.0), Vec2::new(2.0, 4.0), Color::WHITE)
}

/// Downward triangle with two wing stubs and a marker
fn paint_hostile(ctx: &mut dyn DrawContext, e: &Entity) -> Result<(), RenderError> {
    let c = e.center();
    let (x, y, w, h) = (e.pos.x, e.pos.y, e.size.x, e.size.y);
    ctx.fill_polygon(
        &[Vec2::new(c.x, y + h), Vec2::new(x, y), Vec2::new(x + w, y)],
        e.color,
    )?;
    let wing = Vec2::splat(10.0);
    ctx.fill_rect(Vec2::new(x - 5.0, c.y - 5.0), wing, e.color)?;
    ctx.fill_rect(Vec2::new(x + w - 5.0, c.y - 5.0), wing, e.color)?;
    ctx.fill_circles(&[(c, 5.0)], HOSTILE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::HighScore;
    use crate::renderer::{DrawCommand, RecordingContext};
    use crate::sim::hostile::{self, HostileTier};
    use crate::sim::projectile;
    use crate::tuning::Tuning;

    fn scene() -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(Vec2::new(800.0, 600.0), HighScore::default(), &tuning);
        state.reset_run(0.0, &tuning);
        state
    }

    /// Fill colors of entity primitives (after background and clouds)
    fn entity_colors(commands: &[DrawCommand]) -> Vec<Color> {
        commands[5..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polygon { color, .. } => Some(*color),
                DrawCommand::Ellipse { color, radii, .. } if radii.x > 2.0 => Some(*color),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_background_then_clouds() {
        let mut ctx = RecordingContext::new();
        draw_scene(&mut ctx, &scene()).unwrap();
        assert_eq!(ctx.commands[0], DrawCommand::Clear { width: 800.0, height: 600.0 });
        assert_eq!(
            ctx.commands[1],
            DrawCommand::Gradient {
                pos: Vec2::ZERO,
                size: Vec2::new(800.0, 600.0),
                top: SKY_TOP,
                bottom: SKY_BOTTOM,
            }
        );
        for i in 2..5 {
            assert!(matches!(&ctx.commands[i], DrawCommand::Circles { circles, .. } if circles.len() == 3));
        }
    }

    #[test]
    fn test_paint_order_player_projectiles_hostiles() {
        let mut state = scene();
        state.hostiles.push(hostile::spawn(10, HostileTier::Medium, 50.0));
        state.projectiles.push(projectile::spawn(11, Vec2::new(300.0, 300.0), 8.0));

        let mut ctx = RecordingContext::new();
        draw_scene(&mut ctx, &state).unwrap();
        assert_eq!(
            entity_colors(&ctx.commands),
            vec![
                crate::sim::player::PLAYER_COLOR,
                projectile::PROJECTILE_COLOR,
                HostileTier::Medium.spec().color,
            ]
        );
    }

    #[test]
    fn test_dead_entities_are_not_drawn() {
        let mut state = scene();
        let mut dead = hostile::spawn(10, HostileTier::Small, 50.0);
        dead.kill();
        state.hostiles.push(dead);

        let mut ctx = RecordingContext::new();
        draw_scene(&mut ctx, &state).unwrap();
        assert_eq!(entity_colors(&ctx.commands), vec![crate::sim::player::PLAYER_COLOR]);
    }

    #[test]
    fn test_backend_error_propagates() {
        let mut ctx = RecordingContext::new();
        ctx.set_failing(true);
        assert!(draw_scene(&mut ctx, &scene()).is_err());
        assert!(ctx.commands.is_empty());
    }
}
