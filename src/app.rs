//! Application shell: egui integration, the frame loop, and the painter
//! implementation of the rasterizer seam.
//!
//! Everything the core treats as an external collaborator lives here: key
//! sampling, the fixed-step driver, polygon/billboard rasterization via the
//! egui painter, and HUD text layout.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Stroke};
use glam::Vec2;

use roadrush::input::KeyBindings;
use roadrush::storage::{GameConfig, LevelData};
use roadrush::world::hud::Hud;
use roadrush::world::projection::Viewport;
use roadrush::world::rasterizer::{Rasterizer, Rgb};
use roadrush::world::track::SpriteKind;
use roadrush::world::{World, SIM_STEP};

/// Nominal world-space width of a billboard sprite; multiplied by the
/// perspective scale to get its on-screen size.
const SPRITE_WORLD_WIDTH: f32 = 1500.0;

/// Longest wall-clock slice fed into the accumulator; anything longer
/// (a dragged window, a debugger pause) is treated as a hitch, not time
/// the simulation owes.
const MAX_FRAME_DT: f32 = 0.25;

fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// [`Rasterizer`] on top of the egui painter. Billboards are drawn as
/// flat vector stand-ins for the texture assets.
struct PainterRasterizer<'a> {
    painter: &'a egui::Painter,
    origin: Pos2,
    viewport_width: f32,
}

impl PainterRasterizer<'_> {
    fn pos(&self, v: Vec2) -> Pos2 {
        Pos2::new(self.origin.x + v.x, self.origin.y + v.y)
    }
}

impl Rasterizer for PainterRasterizer<'_> {
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgb) {
        let rect = Rect::from_min_max(self.pos(min), self.pos(max));
        self.painter.rect_filled(rect, 0.0, to_color32(color));
    }

    fn fill_quad(&mut self, corners: [Vec2; 4], color: Rgb) {
        let points = corners.iter().map(|c| self.pos(*c)).collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            to_color32(color),
            Stroke::NONE,
        ));
    }

    fn draw_billboard(&mut self, kind: SpriteKind, pos: Vec2, scale: f32) {
        let width = scale * SPRITE_WORLD_WIDTH * self.viewport_width / 2.0;
        if width < 1.0 {
            return;
        }
        let height = width * billboard_aspect(kind);
        let (ax, ay) = kind.anchor();
        let top_left = self.pos(Vec2::new(pos.x - width * ax, pos.y - height * ay));
        let rect = Rect::from_min_size(top_left, egui::vec2(width, height));
        draw_billboard_art(self.painter, kind, rect);
    }
}

/// Height over width for each sprite kind.
fn billboard_aspect(kind: SpriteKind) -> f32 {
    match kind {
        SpriteKind::Tree => 1.4,
        SpriteKind::Rock => 0.6,
        SpriteKind::Church => 1.1,
        SpriteKind::StartBanner | SpriteKind::FinishBanner => 0.7,
        _ => 0.9,
    }
}

/// Flat vector art standing in for the billboard textures.
fn draw_billboard_art(painter: &egui::Painter, kind: SpriteKind, rect: Rect) {
    match kind {
        SpriteKind::Tree => {
            let trunk = Rect::from_min_max(
                Pos2::new(rect.center().x - rect.width() * 0.07, rect.top() + rect.height() * 0.6),
                Pos2::new(rect.center().x + rect.width() * 0.07, rect.bottom()),
            );
            painter.rect_filled(trunk, 0.0, Color32::from_rgb(0x6B, 0x44, 0x23));
            painter.circle_filled(
                Pos2::new(rect.center().x, rect.top() + rect.height() * 0.35),
                rect.width() * 0.45,
                Color32::from_rgb(0x1E, 0x7A, 0x1E),
            );
        }
        SpriteKind::Rock => {
            painter.rect_filled(rect, rect.width() * 0.3, Color32::from_rgb(0x8A, 0x8A, 0x8A));
        }
        SpriteKind::StartBanner | SpriteKind::FinishBanner => {
            let (fill, text, label) = if kind == SpriteKind::StartBanner {
                (Color32::WHITE, Color32::BLACK, "START")
            } else {
                (Color32::BLACK, Color32::WHITE, "FINISH")
            };
            painter.rect_filled(rect, 0.0, fill);
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(rect.height() * 0.4),
                text,
            );
        }
        building => {
            let body_color = match building {
                SpriteKind::FastFood => Color32::from_rgb(0xC8, 0x3A, 0x2E),
                SpriteKind::Business => Color32::from_rgb(0x5A, 0x6B, 0x82),
                SpriteKind::Church => Color32::from_rgb(0xE8, 0xE2, 0xD4),
                _ => Color32::from_rgb(0xD9, 0x7A, 0x2B), // gas station
            };
            let body = Rect::from_min_max(
                Pos2::new(rect.left(), rect.top() + rect.height() * 0.3),
                rect.max,
            );
            painter.rect_filled(body, 0.0, body_color);
            // Roof triangle.
            painter.add(egui::Shape::convex_polygon(
                vec![
                    Pos2::new(rect.left(), body.top()),
                    Pos2::new(rect.center().x, rect.top()),
                    Pos2::new(rect.right(), body.top()),
                ],
                body_color.gamma_multiply(0.7),
                Stroke::NONE,
            ));
            let door = Rect::from_min_max(
                Pos2::new(rect.center().x - rect.width() * 0.08, rect.bottom() - rect.height() * 0.25),
                Pos2::new(rect.center().x + rect.width() * 0.08, rect.bottom()),
            );
            painter.rect_filled(door, 0.0, Color32::from_rgb(0x33, 0x2B, 0x22));
        }
    }
}

/// The eframe application: owns the world and drives one fixed-step
/// simulation slice plus one render pass per display frame.
pub struct RoadRushApp {
    world: World,
    bindings: KeyBindings,
    hud: Hud,
    fog_color: Color32,
    track_name: String,
    accumulator: f32,
}

impl RoadRushApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, level: LevelData, config: GameConfig) -> Self {
        let fog_color = Rgb::from_hex(&level.fog_color)
            .map(to_color32)
            .unwrap_or(Color32::from_rgb(0x72, 0xD7, 0xEE));

        Self {
            world: World::from_level(&level, &config),
            bindings: KeyBindings::default(),
            hud: Hud,
            fog_color,
            track_name: level.track_name,
            accumulator: 0.0,
        }
    }

    fn draw_player_car(&self, painter: &egui::Painter, rect: Rect) {
        let width = rect.width() * 0.16;
        let height = width * 0.5;
        let center_x = rect.center().x;
        let bottom = rect.bottom() - 20.0;

        let body = Rect::from_min_max(
            Pos2::new(center_x - width / 2.0, bottom - height * 0.6),
            Pos2::new(center_x + width / 2.0, bottom),
        );
        painter.rect_filled(body, width * 0.06, Color32::from_rgb(0xC6, 0x20, 0x2B));
        let cabin = Rect::from_min_max(
            Pos2::new(center_x - width * 0.28, bottom - height),
            Pos2::new(center_x + width * 0.28, bottom - height * 0.5),
        );
        painter.rect_filled(cabin, width * 0.05, Color32::from_rgb(0x2B, 0x2B, 0x31));
        for side in [-1.0_f32, 1.0] {
            let wheel = Rect::from_center_size(
                Pos2::new(center_x + side * width * 0.42, bottom - height * 0.08),
                egui::vec2(width * 0.16, height * 0.25),
            );
            painter.rect_filled(wheel, width * 0.03, Color32::BLACK);
        }
    }

    fn draw_hud(&self, painter: &egui::Painter, rect: Rect) {
        let readout = self.world.readout();
        let font = FontId::monospace(20.0);
        let top = rect.top() + 12.0;

        painter.text(
            Pos2::new(rect.left() + 16.0, top),
            Align2::LEFT_TOP,
            format!("SPEED {}", self.hud.format_speed(&readout)),
            font.clone(),
            Color32::WHITE,
        );
        painter.text(
            Pos2::new(rect.center().x - 60.0, top),
            Align2::CENTER_TOP,
            format!("SCORE {}", self.hud.format_score(&readout)),
            font.clone(),
            Color32::WHITE,
        );
        painter.text(
            Pos2::new(rect.center().x + 80.0, top),
            Align2::CENTER_TOP,
            format!("TIME {}", self.hud.format_time(&readout)),
            font.clone(),
            Color32::YELLOW,
        );
        painter.text(
            Pos2::new(rect.right() - 16.0, top),
            Align2::RIGHT_TOP,
            format!("LAP {}", self.hud.format_lap(&readout)),
            font,
            Color32::WHITE,
        );

        use roadrush::racing::RaceStatus;
        let banner = match self.world.race.status {
            RaceStatus::Finished => Some("YOU WIN!"),
            RaceStatus::TimeExpired => Some("TIME UP"),
            RaceStatus::Racing => None,
        };
        if let Some(banner) = banner {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                banner,
                FontId::proportional(64.0),
                Color32::WHITE,
            );
            painter.text(
                Pos2::new(rect.center().x, rect.center().y + 48.0),
                Align2::CENTER_CENTER,
                "press R to restart",
                FontId::proportional(22.0),
                Color32::from_gray(220),
            );
        }
    }
}

impl eframe::App for RoadRushApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (controls, toggle_sprites, restart) = ctx.input(|input| {
            (
                self.bindings.sample(input),
                self.bindings.sprite_toggle_pressed(input),
                self.bindings.restart_pressed(input),
            )
        });

        if toggle_sprites {
            self.world.renderer.draw_sprites = !self.world.renderer.draw_sprites;
            tracing::debug!(draw_sprites = self.world.renderer.draw_sprites, "sprite toggle");
        }
        if restart && self.world.race.is_over() {
            self.world.restart();
        }

        // Input is sampled once, then consumed by every whole step the
        // frame owes; rendering below reads the fully updated state.
        let frame_dt = ctx.input(|input| input.stable_dt).min(MAX_FRAME_DT);
        self.accumulator += frame_dt;
        while self.accumulator >= SIM_STEP {
            self.world.update(&controls, SIM_STEP);
            self.accumulator -= SIM_STEP;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.fog_color))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter();
                let viewport = Viewport {
                    width: rect.width(),
                    height: rect.height(),
                };

                let mut raster = PainterRasterizer {
                    painter,
                    origin: rect.min,
                    viewport_width: rect.width(),
                };
                self.world.render(&mut raster, viewport);

                if self.world.renderer.draw_sprites {
                    self.draw_player_car(painter, rect);
                }
                self.draw_hud(painter, rect);

                painter.text(
                    Pos2::new(rect.left() + 16.0, rect.bottom() - 12.0),
                    Align2::LEFT_BOTTOM,
                    &self.track_name,
                    FontId::proportional(14.0),
                    Color32::from_gray(230),
                );
            });

        ctx.request_repaint();
    }
}
