use super::core::{init, transition, Effect, Event};
use super::main::ColorPicker;
use crate::device_display::interface::DeviceDisplayEvent;

impl ColorPicker {
    pub(crate) fn spawn_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            let self_clone = self.clone();
            std::thread::spawn(move || self_clone.interpret_effect(effect));
        }
    }

    fn run_loop(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (initial_model, initial_effects) = init();
        *self.model.lock().unwrap() = initial_model.clone();
        self.spawn_effects(initial_effects);

        let mut current_model = initial_model;

        loop {
            let event = self
                .event_receiver
                .lock()
                .unwrap()
                .recv()
                .map_err(|e| format!("event channel closed: {}", e))?;

            // Ticks and pointer moves fire many times a second; logging them
            // would drown everything else.
            let quiet = matches!(
                event,
                Event::Tick(_) | Event::DisplayEvent(DeviceDisplayEvent::PointerMoved { .. })
            );

            if !quiet {
                let _ = self.logger.info(&format!(
                    "\nold model:\n\t{:?}\n\nevent:\n\t{:?}",
                    current_model, event,
                ));
            }

            let (new_model, effects) = transition(&self.config, current_model, event);

            if !quiet {
                let _ = self.logger.info(&format!(
                    "\nnew model:\n\t{:?}\n\neffects:\n\t{:?}",
                    new_model, effects
                ));
            }

            current_model = new_model.clone();
            *self.model.lock().unwrap() = new_model;

            self.render(&current_model)?;

            self.spawn_effects(effects);
        }
    }

    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.run_loop()
    }
}
