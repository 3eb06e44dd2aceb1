use glam::Vec2;

use crate::api::types::{Rgba, FIELDS_PER_BODY};
use crate::modal::controller::ModalState;
use crate::modal::layout::{ModalLayout, CELL_H, PADDING, PANEL_H, VISIBLE_ROWS};
use crate::render::canvas::{Canvas, Rect};
use crate::render::text::TextMetrics;

const OVERLAY: Rgba = Rgba::new(0, 0, 0, 160);
const PANEL_BG: Rgba = Rgba::new(18, 18, 22, 240);
const PANEL_BORDER: Rgba = Rgba::new(110, 110, 130, 255);
const TITLE: Rgba = Rgba::opaque(200, 220, 255);
const LABEL: Rgba = Rgba::opaque(200, 200, 200);
const HINT: Rgba = Rgba::opaque(180, 180, 180);
const TOGGLE_LABEL: Rgba = Rgba::opaque(220, 220, 220);
const BTN_BG: Rgba = Rgba::opaque(50, 50, 60);
const BTN_BORDER: Rgba = Rgba::opaque(100, 100, 120);
const COUNT_BG: Rgba = Rgba::opaque(36, 36, 46);
const CELL_BG: Rgba = Rgba::new(28, 28, 36, 230);
const CELL_BORDER: Rgba = Rgba::opaque(90, 90, 100);
const CELL_BORDER_FOCUS: Rgba = Rgba::opaque(255, 200, 80);
const CELL_BORDER_INVALID: Rgba = Rgba::opaque(220, 80, 80);
const CELL_TEXT: Rgba = Rgba::opaque(230, 230, 230);
const TRACK_BG: Rgba = Rgba::new(40, 40, 40, 200);
const TRACK_BORDER: Rgba = Rgba::new(90, 90, 90, 200);
const THUMB_BG: Rgba = Rgba::new(120, 120, 120, 220);
const THUMB_BORDER: Rgba = Rgba::new(200, 200, 200, 220);
const KNOB_ON: Rgba = Rgba::opaque(40, 80, 40);
const KNOB_OFF: Rgba = Rgba::opaque(200, 220, 255);
const KNOB_SHADOW: Rgba = Rgba::new(20, 20, 20, 120);
const CANCEL_BG: Rgba = Rgba::opaque(80, 40, 40);
const CANCEL_BORDER: Rgba = Rgba::opaque(160, 100, 100);
const CANCEL_TEXT: Rgba = Rgba::opaque(255, 220, 220);
const OK_BG: Rgba = Rgba::opaque(40, 80, 40);
const OK_BORDER: Rgba = Rgba::opaque(120, 200, 120);
const OK_TEXT: Rgba = Rgba::opaque(220, 255, 220);
const ERROR_TEXT: Rgba = Rgba::opaque(255, 120, 120);

fn panel(canvas: &mut Canvas, rect: Rect, bg: Rgba, border: Rgba) {
    canvas.fill_rect(rect, bg);
    canvas.rect_outline(rect, border);
}

fn text_centered(
    canvas: &mut Canvas,
    metrics: &dyn TextMetrics,
    rect: Rect,
    s: &str,
    color: Rgba,
) {
    let (tw, th) = metrics.measure(s);
    let pos = Vec2::new(rect.x + (rect.w - tw) / 2.0, rect.y + (rect.h - th) / 2.0);
    canvas.text(pos, s, color);
}

fn cell(canvas: &mut Canvas, rect: Rect, text: &str, focused: bool, valid: bool) {
    let border = if !valid {
        CELL_BORDER_INVALID
    } else if focused {
        CELL_BORDER_FOCUS
    } else {
        CELL_BORDER
    };
    panel(canvas, rect, CELL_BG, border);
    canvas.text(Vec2::new(rect.x + 8.0, rect.y + 8.0), text, CELL_TEXT);
}

/// Emit the whole modal as draw commands. Pure: no state mutation, no pixel
/// output, everything the host needs is in the canvas afterwards.
pub fn draw_modal(
    state: &ModalState,
    layout: &ModalLayout,
    metrics: &dyn TextMetrics,
    canvas: &mut Canvas,
) {
    let vp = state.viewport();
    canvas.fill_rect(Rect::new(0.0, 0.0, vp.w, vp.h), OVERLAY);
    panel(canvas, layout.panel, PANEL_BG, PANEL_BORDER);

    let left = layout.panel.x + PADDING;
    canvas.title(
        Vec2::new(left, layout.panel.y + PADDING),
        "PARÂMETROS DE ENTRADA",
        TITLE,
    );
    let (mode_line, mode_color) = if state.use_defaults() {
        ("Usando defaults (desative toggle para editar)", HINT)
    } else {
        ("Edição manual ativa", LABEL)
    };
    canvas.text(
        Vec2::new(left, layout.panel.y + PADDING + 42.0),
        mode_line,
        mode_color,
    );

    // body-count control cluster
    panel(canvas, layout.minus_btn, BTN_BG, BTN_BORDER);
    panel(canvas, layout.count_box, COUNT_BG, BTN_BORDER);
    panel(canvas, layout.plus_btn, BTN_BG, BTN_BORDER);
    text_centered(
        canvas,
        metrics,
        layout.count_box,
        &state.chosen_n().to_string(),
        CELL_TEXT,
    );
    let ctrl = if state.use_defaults() {
        Rgba::opaque(120, 120, 120)
    } else {
        Rgba::opaque(220, 220, 220)
    };
    canvas.text(
        Vec2::new(layout.minus_btn.x + 10.0, layout.minus_btn.y + 8.0),
        "-",
        ctrl,
    );
    canvas.text(
        Vec2::new(layout.plus_btn.x + 10.0, layout.plus_btn.y + 8.0),
        "+",
        ctrl,
    );

    // visible body rows; Rx is displayed left, Ry right
    let grid = state.grid();
    for vis in 0..VISIBLE_ROWS {
        let bi = state.scroll() + vis;
        if bi >= grid.len() {
            break;
        }
        let row = layout.row(vis);
        canvas.text(row.origin, &format!("Objeto {}", bi + 1), TITLE);
        canvas.text(
            Vec2::new(row.origin.x, row.origin.y + 22.0),
            "SEMI-EIXOS (Rx esquerda ; Ry direita)",
            LABEL,
        );
        let base = bi * FIELDS_PER_BODY;
        let focus = state.focus();
        cell(
            canvas,
            row.axis_left,
            &grid.cell_at(base + 1).text,
            focus == base + 1,
            grid.cell_at(base + 1).valid,
        );
        cell(
            canvas,
            row.axis_right,
            &grid.cell_at(base).text,
            focus == base,
            grid.cell_at(base).valid,
        );
        canvas.text(
            Vec2::new(row.origin.x, row.origin.y + 52.0 + CELL_H + 10.0),
            "VELOCIDADE ANGULAR E TAMANHO",
            LABEL,
        );
        cell(
            canvas,
            row.omega,
            &grid.cell_at(base + 2).text,
            focus == base + 2,
            grid.cell_at(base + 2).valid,
        );
        cell(
            canvas,
            row.size,
            &grid.cell_at(base + 3).text,
            focus == base + 3,
            grid.cell_at(base + 3).valid,
        );
    }

    if let Some(thumb) = layout.thumb {
        panel(canvas, layout.track, TRACK_BG, TRACK_BORDER);
        panel(canvas, thumb, THUMB_BG, THUMB_BORDER);
    }

    canvas.text(
        Vec2::new(left, layout.panel.y + PANEL_H - PADDING - 88.0),
        "Tab/Shift+Tab mover  Clique para foco  Enter proximo  Esc cancelar",
        HINT,
    );

    // rounded toggle with circular knob
    let toggle = layout.toggle;
    let radius = toggle.h / 2.0;
    canvas.round_rect_fill(toggle, radius, BTN_BG);
    canvas.round_rect_outline(toggle, radius, BTN_BORDER);
    let mut krad = radius - 3.0;
    if krad < 4.0 {
        krad = radius - 2.0;
    }
    let pad = 3.0;
    let kx = if state.use_defaults() {
        toggle.x + toggle.w - pad - krad
    } else {
        toggle.x + pad + krad
    };
    let ky = toggle.y + toggle.h / 2.0;
    let knob = if state.use_defaults() { KNOB_ON } else { KNOB_OFF };
    canvas.fill_circle(Vec2::new(kx, ky + 1.0), krad + 1.0, KNOB_SHADOW);
    canvas.fill_circle(Vec2::new(kx, ky), krad, knob);
    canvas.text(
        Vec2::new(toggle.x + toggle.w + 12.0, toggle.y + (toggle.h - 16.0) / 2.0),
        "Use defaults",
        TOGGLE_LABEL,
    );

    panel(canvas, layout.cancel_btn, CANCEL_BG, CANCEL_BORDER);
    panel(canvas, layout.ok_btn, OK_BG, OK_BORDER);
    text_centered(canvas, metrics, layout.cancel_btn, "CANCEL", CANCEL_TEXT);
    text_centered(canvas, metrics, layout.ok_btn, "OK", OK_TEXT);

    if let Some(err) = state.error() {
        canvas.text(
            Vec2::new(left + 240.0, layout.panel.y + PANEL_H - PADDING - 48.0),
            &err.to_string(),
            ERROR_TEXT,
        );
    }
}
