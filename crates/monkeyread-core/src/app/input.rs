impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    debug!("reader: input provider failed, pausing");
                    self.pause();
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        match event {
            InputEvent::TogglePlay => {
                let _ = self.toggle_playback(now_ms);
            }
            InputEvent::Play => {
                let _ = self.play(now_ms);
            }
            InputEvent::Pause => self.pause(),
            InputEvent::Reset => self.reset(),
            InputEvent::Faster => {
                let _ = self.nudge_wpm(true);
            }
            InputEvent::Slower => {
                let _ = self.nudge_wpm(false);
            }
            InputEvent::StepBack => {
                let _ = self.step(-1);
            }
            InputEvent::StepForward => {
                let _ = self.step(1);
            }
            InputEvent::JumpBack => {
                let _ = self.step(-(JUMP_UNITS as isize));
            }
            InputEvent::JumpForward => {
                let _ = self.step(JUMP_UNITS as isize);
            }
            InputEvent::ToggleEmphasis => self.toggle_emphasis(),
            InputEvent::Quit => {
                self.pause();
                self.request_quit();
            }
        }
    }
}
