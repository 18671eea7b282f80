//! The curses program every build produces. Frames are spliced in by
//! [`crate::source`]; this module only holds the fixed parts and the few
//! values that vary between builds.

use crate::types::frame_delay::FrameDelay;

pub const PROLOGUE: &str = r#"#define _POSIX_C_SOURCE 200809L

#include <curses.h>
#include <signal.h>
#include <stdio.h>
#include <stdlib.h>
#include <time.h>

"#;

const PROGRAM: &str = r#"
static WINDOW *mainwin = NULL;

static void cleanup(void)
{
    if (mainwin != NULL) {
        endwin();
        mainwin = NULL;
    }
}

static void signal_handler(int signum)
{
    (void)signum;
    cleanup();
    exit(EXIT_SUCCESS);
}
{{HELPERS}}
int main(void)
{
    struct timespec frame_delay;
    {{FRAME_DELAY}}

    struct sigaction interrupt;
    interrupt.sa_handler = signal_handler;
    sigemptyset(&interrupt.sa_mask);
    interrupt.sa_flags = 0;
    sigaction(SIGINT, &interrupt, NULL);

    if ((mainwin = initscr()) == NULL) {
        fprintf(stderr, "Error initialising curses.\n");
        return EXIT_FAILURE;
    }

    const int framecnt = (int)(sizeof(frames) / sizeof(frames[0]));
    int frame = 0;

    nodelay(mainwin, TRUE);

    for (;;) {
        if (getch() == 27) {
            break;
        }
{{DRAW}}
        frame = frame == framecnt - 1 ? 0 : frame + 1;
    }

    cleanup();
    return EXIT_SUCCESS;
}
"#;

const REMAINING_DELAY: &str = r#"
static int remaining_delay(const struct timespec *delay,
                           const struct timespec *from,
                           const struct timespec *to,
                           struct timespec *remaining)
{
    long long elapsed = (long long)(to->tv_sec - from->tv_sec) * 1000000000LL
                        + (to->tv_nsec - from->tv_nsec);
    long long left = (long long)delay->tv_sec * 1000000000LL + delay->tv_nsec - elapsed;

    if (left <= 0) {
        return 0;
    }
    remaining->tv_sec = (time_t)(left / 1000000000LL);
    remaining->tv_nsec = (long)(left % 1000000000LL);
    return 1;
}
"#;

const DRAW_FIXED: &str = "        clear();
        mvaddstr(0, 0, frames[frame]);
        refresh();
        nanosleep(&frame_delay, NULL);";

const DRAW_COMPENSATED: &str = "        struct timespec drawn_from, drawn_to, remaining;
        clock_gettime(CLOCK_MONOTONIC, &drawn_from);
        clear();
        mvaddstr(0, 0, frames[frame]);
        refresh();
        clock_gettime(CLOCK_MONOTONIC, &drawn_to);
        if (remaining_delay(&frame_delay, &drawn_from, &drawn_to, &remaining)) {
            nanosleep(&remaining, NULL);
        }";

/// How the player waits between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep the full delay after drawing.
    Fixed,
    /// Subtract the time spent drawing from the delay.
    Compensated,
}

impl Pacing {
    pub fn new(compensate: bool) -> Self {
        if compensate {
            Self::Compensated
        } else {
            Self::Fixed
        }
    }
}

pub fn frame_delay_init(delay: FrameDelay) -> String {
    format!(
        "frame_delay.tv_sec = {};\n    frame_delay.tv_nsec = {};",
        delay.seconds, delay.nanoseconds
    )
}

/// The playback program, expecting `frames` to be declared before it.
pub fn render_program(delay: FrameDelay, pacing: Pacing) -> String {
    let (helpers, draw) = match pacing {
        Pacing::Fixed => ("", DRAW_FIXED),
        Pacing::Compensated => (REMAINING_DELAY, DRAW_COMPENSATED),
    };

    PROGRAM
        .replacen("{{HELPERS}}", helpers, 1)
        .replacen("{{FRAME_DELAY}}", &frame_delay_init(delay), 1)
        .replacen("{{DRAW}}", draw, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_is_spelled_out() {
        let program = render_program(FrameDelay::new(2, 500), Pacing::Fixed);
        assert!(program.contains("frame_delay.tv_sec = 2;"));
        assert!(program.contains("frame_delay.tv_nsec = 500;"));
        assert!(!program.contains("{{"));
    }

    #[test]
    fn fixed_pacing_sleeps_the_whole_delay() {
        let program = render_program(FrameDelay::default(), Pacing::Fixed);
        assert!(program.contains("nanosleep(&frame_delay, NULL);"));
        assert!(!program.contains("remaining_delay"));
        assert!(!program.contains("clock_gettime"));
    }

    #[test]
    fn compensated_pacing_measures_drawing() {
        let program = render_program(FrameDelay::default(), Pacing::Compensated);
        assert!(program.contains("static int remaining_delay("));
        assert!(program.contains("clock_gettime(CLOCK_MONOTONIC, &drawn_to);"));
        assert!(program.contains("nanosleep(&remaining, NULL);"));
        assert!(!program.contains("{{"));
    }

    #[test]
    fn loop_quits_on_escape_and_wraps_around() {
        let program = render_program(FrameDelay::default(), Pacing::Fixed);
        assert!(program.contains("nodelay(mainwin, TRUE);"));
        assert!(program.contains("if (getch() == 27) {"));
        assert!(program.contains("frame = frame == framecnt - 1 ? 0 : frame + 1;"));
        assert!(program.contains("sigaction(SIGINT, &interrupt, NULL);"));
    }
}
