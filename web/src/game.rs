use crate::audio::AudioPlayer;
use crate::settings::Settings;
use crate::utils::*;
use bitflags::bitflags;
use gloo::timers::callback::Interval;
use grassweeper_core as game;
use serde::{Deserialize, Serialize};
use web_time::Instant;
use yew::prelude::*;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub(crate) struct MouseButtons: u16 {
        const LEFT    = 1;
        const RIGHT   = 1 << 1;
        const MIDDLE  = 1 << 2;
        const BACK    = 1 << 3;
        const FORWARD = 1 << 4;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum PointerMsg {
    Press(MouseButtons),
    Release(Option<game::Coord2>),
    Leave,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Pointer(PointerMsg),
    Tick,
    Reset,
    ToggleSound,
    PlayAgain,
}

/// Position of a mouse event relative to `node`.
fn offset_in(node: &NodeRef, e: &MouseEvent) -> Option<(f64, f64)> {
    let element = node.cast::<web_sys::Element>()?;
    let rect = element.get_bounding_client_rect();
    Some((
        f64::from(e.client_x()) - rect.left(),
        f64::from(e.client_y()) - rect.top(),
    ))
}

fn cell_classes(tile: game::Tile) -> Classes {
    use game::TileState::*;

    let hint = tile.hint();
    classes!(
        "cell",
        match tile.state() {
            Grass | HiddenBomb => classes!("grass"),
            GrassFlagged | BombFlagged => classes!("grass", "flag"),
            DisplayAdjacentBombs => classes!(
                "open",
                format!("num-{}", tile.adjacent_bombs()),
                hint.shade.map(|shade| format!("shade-{}", shade)),
            ),
            ExplodingBomb => classes!(
                "mine",
                hint.bomb.map(|variant| format!("boom-{}", variant)),
            ),
        }
    )
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    tile: game::Tile,
    left: u32,
    top: u32,
    size: u16,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        tile,
        left,
        top,
        size,
    } = props.clone();
    let class = cell_classes(tile);
    let style = format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px;",
        left, top, size, size
    );

    html! {
        <div {class} {style}/>
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: game::Session,
    settings: Settings,
    audio: AudioPlayer,
    pressed: MouseButtons,
    board_ref: NodeRef,
    last_tick: Instant,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(100, move || link.send_message(Msg::Tick))
    }

    fn geometry(&self) -> game::BoardGeometry {
        self.session.board().config().geometry()
    }

    /// Carries out the side effects of a handled input, returning whether to redraw.
    fn apply(&mut self, feedback: game::Feedback) -> bool {
        self.audio.run(&feedback.audio);
        if let Some(best) = feedback.new_best {
            log::debug!("new best time: {}", best.seconds());
            save_best_time(best);
        }
        feedback.updated
    }

    fn on_pointer(&mut self, msg: PointerMsg) -> bool {
        match msg {
            PointerMsg::Press(buttons) => {
                self.pressed |= buttons;
                false
            }
            PointerMsg::Leave => {
                self.pressed = MouseButtons::empty();
                false
            }
            PointerMsg::Release(pos) => {
                let buttons = std::mem::replace(&mut self.pressed, MouseButtons::empty());
                let Some(pos) = pos else {
                    return false;
                };
                let feedback = match buttons {
                    MouseButtons::LEFT => {
                        log::debug!("dig tile: {:?}", pos);
                        self.session.primary_click(pos)
                    }
                    MouseButtons::RIGHT => {
                        log::debug!("flag tile: {:?}", pos);
                        self.session.secondary_click(pos)
                    }
                    _ => {
                        log::trace!("ignoring release of {:?}", buttons);
                        return false;
                    }
                };
                self.apply(feedback)
            }
        }
    }

    fn view_hud(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cb_reset = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Reset
        });
        let cb_sound = ctx.link().callback(|_| ToggleSound);
        let sound_class = classes!(
            "sound",
            if self.session.sound_enabled() { "on" } else { "off" }
        );
        // stays above the game-over shadow so the sound toggle remains usable
        let style = format!(
            "position: relative; z-index: 1; height: {}px;",
            game::HUD_BAR_HEIGHT
        );

        html! {
            <nav {style}>
                <button class="reset" onclick={cb_reset}/>
                <aside class="flags">{self.session.flags_left()}</aside>
                <aside class="watch">{self.session.elapsed_display()}</aside>
                <button class={sound_class} onclick={cb_sound}/>
            </nav>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let geometry = self.geometry();
        let style = format!(
            "position: relative; width: {}px; height: {}px;",
            geometry.width(),
            geometry.height()
        );

        let onmousedown = ctx.link().callback(|e: MouseEvent| {
            let buttons = MouseButtons::from_bits_truncate(e.buttons());
            log::trace!("mouse down ({:?})", buttons);
            Msg::Pointer(PointerMsg::Press(buttons))
        });
        let board_ref = self.board_ref.clone();
        let onmouseup = ctx.link().callback(move |e: MouseEvent| {
            let pos = offset_in(&board_ref, &e).and_then(|(x, y)| geometry.cell_at(x, y));
            log::trace!("mouse up at {:?}", pos);
            Msg::Pointer(PointerMsg::Release(pos))
        });
        let onmouseleave = ctx
            .link()
            .callback(|_: MouseEvent| Msg::Pointer(PointerMsg::Leave));

        html! {
            <div class="board" ref={self.board_ref.clone()} {style} {onmousedown} {onmouseup} {onmouseleave}>
                {
                    for self.session.board().iter_tiles().map(|(pos, tile)| {
                        let (left, top) = geometry.tile_origin(pos);
                        let size = geometry.tile_size();
                        html! {
                            <CellView {tile} {left} {top} {size}/>
                        }
                    })
                }
                if self.session.instructions_visible() {
                    <div class="instructions">{"Left click to dig, right click to flag"}</div>
                }
                { self.view_game_over(ctx) }
            </div>
        }
    }

    fn view_game_over(&self, ctx: &Context<Self>) -> Html {
        let game::Phase::GameOver { won } = self.session.phase() else {
            return html! {};
        };
        let cb_play_again = ctx.link().callback(|_| Msg::PlayAgain);
        let (class, label) = if won {
            ("results won", "Play again")
        } else {
            ("results lost", "Try again")
        };

        html! {
            <>
                <div class="shadow" style="position: absolute; inset: 0;"/>
                <div {class}>
                    <dl>
                        <dt>{"Time"}</dt>
                        <dd>{self.session.result_time_display()}</dd>
                        <dt>{"Best"}</dt>
                        <dd>{self.session.best_time_display()}</dd>
                    </dl>
                    <button onclick={cb_play_again}>{label}</button>
                </div>
            </>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let settings: Settings = LocalOrDefault::local_or_default();
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        let board = game::Board::from_seed(game::BoardConfig::EASY, seed);
        let session = game::Session::new(board, load_best_time(), settings.sound_enabled);

        Self {
            session,
            settings,
            audio: AudioPlayer::new(),
            pressed: MouseButtons::empty(),
            board_ref: NodeRef::default(),
            last_tick: Instant::now(),
            _timer_interval: GameView::create_timer(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Pointer(pointer) => self.on_pointer(pointer),
            Tick => {
                let now = Instant::now();
                let dt = now.duration_since(self.last_tick);
                self.last_tick = now;
                self.session.tick(dt).updated
            }
            Reset => {
                let feedback = self.session.reset();
                self.apply(feedback)
            }
            PlayAgain => {
                let feedback = self.session.play_again();
                self.apply(feedback)
            }
            ToggleSound => {
                let feedback = self.session.toggle_sound();
                self.settings.sound_enabled = self.session.sound_enabled();
                self.settings.local_save();
                self.apply(feedback)
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let geometry = self.geometry();
        let style = format!(
            "width: {}px; height: {}px;",
            geometry.width(),
            geometry.window_height()
        );

        html! {
            <div class="grassweeper" {style} oncontextmenu={Callback::from(move |e: MouseEvent| e.prevent_default())}>
                { self.view_hud(ctx) }
                { self.view_board(ctx) }
            </div>
        }
    }
}
