use crate::{input::events::MapEvent, prelude::HashMap};
use std::collections::VecDeque;

/// Event callback function type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Handle returned by [`EventManager::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Explicit subscription registry for manager state changes
///
/// Events are queued while a state change is in progress and dispatched by
/// `process_events` once it has completed, so listeners never observe a
/// half-applied change.
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event type
    listeners: HashMap<&'static str, Vec<(ListenerId, EventCallback)>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
    next_id: u64,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_type: &'static str, callback: F) -> ListenerId
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners
            .entry(event_type)
            .or_default()
            .push((id, Box::new(callback)));
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn off(&mut self, id: ListenerId) -> bool {
        for callbacks in self.listeners.values_mut() {
            if let Some(index) = callbacks.iter().position(|(listener, _)| *listener == id) {
                callbacks.remove(index);
                return true;
            }
        }
        false
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Process all queued events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(event.event_type()) {
                for (_, callback) in callbacks {
                    callback(event);
                }
            }
        }

        events
    }

    /// Get number of pending events
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::MarkerMode;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_listeners_receive_matching_events() {
        let mut manager = EventManager::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        manager.on("markerschanged", move |event| {
            sink.lock().unwrap().push(event.clone());
        });

        manager.emit(MapEvent::GeoFilterChanged { filter: None });
        manager.emit(MapEvent::MarkersChanged {
            mode: MarkerMode::Facets,
            count: 2,
        });
        assert_eq!(manager.pending_events(), 2);

        let processed = manager.process_events();
        assert_eq!(processed.len(), 2);
        assert_eq!(manager.pending_events(), 0);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![MapEvent::MarkersChanged {
                mode: MarkerMode::Facets,
                count: 2
            }]
        );
    }

    #[test]
    fn test_off_removes_listener() {
        let mut manager = EventManager::new();
        let hits = Arc::new(Mutex::new(0));
        let counter = hits.clone();
        let id = manager.on("viewreset", move |_| *counter.lock().unwrap() += 1);
        assert_eq!(manager.listener_count(), 1);

        assert!(manager.off(id));
        assert!(!manager.off(id));
        assert_eq!(manager.listener_count(), 0);

        manager.emit(MapEvent::DrawingsCleared { count: 0 });
        manager.process_events();
        assert_eq!(*hits.lock().unwrap(), 0);
    }
}
