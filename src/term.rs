/*!
term.rs - Raw-mode terminal frontend (feature `terminal`).

Puts the terminal in raw mode, renders PRA/PRN output at a tracked
cursor position, draws PLOT points as block characters, and feeds key
presses into the keyboard device protocol (deposit the byte in the key
cell, raise the keyboard line). Ctrl-C stops the machine cleanly.
*/

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::execute;

use crate::cpu::HaltReason;
use crate::machine::{Machine, KEYBOARD_LINE, KEY_CELL, TICK_INTERVAL, TIMER_INTERVAL, TIMER_LINE};
use crate::peripheral::Screen;

pub struct TermScreen {
    out: Stdout,
    col: u16,
    row: u16,
}

impl TermScreen {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, Clear(ClearType::All), MoveTo(0, 0), Hide)?;
        Ok(Self { out, col: 0, row: 0 })
    }
}

impl Screen for TermScreen {
    fn putc(&mut self, ch: u8) {
        if ch == b'\n' {
            self.col = 0;
            self.row += 1;
            return;
        }
        let _ = execute!(self.out, MoveTo(self.col, self.row), Print(ch as char));
        self.col += 1;
    }

    fn plot(&mut self, x: u8, y: u8) {
        let _ = execute!(self.out, MoveTo(u16::from(x), u16::from(y)), Print('█'));
    }

    fn stop(&mut self) {
        let _ = execute!(self.out, Show);
        let _ = terminal::disable_raw_mode();
        let _ = self.out.flush();
    }
}

/// Drive the machine at real-time speed, feeding terminal key presses
/// to the keyboard device. Returns when the program halts or the user
/// presses Ctrl-C.
pub fn run_interactive(machine: &mut Machine) -> io::Result<HaltReason> {
    let mut next_timer = Instant::now() + TIMER_INTERVAL;
    loop {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    machine.stop();
                    return Ok(HaltReason::Program);
                }
                let byte = match key.code {
                    KeyCode::Char(c) if c.is_ascii() => c as u8,
                    KeyCode::Enter => b'\n',
                    _ => continue,
                };
                machine.poke(KEY_CELL, byte);
                machine.raise_interrupt(KEYBOARD_LINE);
            }
        }
        if Instant::now() >= next_timer {
            machine.raise_interrupt(TIMER_LINE);
            next_timer += TIMER_INTERVAL;
        }
        if let Some(reason) = machine.halted() {
            return Ok(reason);
        }
        machine.tick();
        thread::sleep(TICK_INTERVAL);
    }
}
