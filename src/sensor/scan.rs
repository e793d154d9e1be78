// src/sensor/scan.rs

use embedded_hal::digital::OutputPin;
use log::warn;

use super::{SensorError, TrillSensor};
use crate::common::{
    error::TrillError,
    hal_traits::TwoWireBus,
    layout::NORMAL_LENGTH,
    response::ScanFrame,
    types::{Mode, Touch},
};

// Normal-mode scan reading and touch accessors
impl<B, R> TrillSensor<B, R>
where
    B: TwoWireBus,
    R: OutputPin,
{
    /// Reads the latest scan frame and recounts the touches.
    ///
    /// On [`TrillError::ShortRead`] the touch count drops to zero and the
    /// frame holds whatever did arrive on top of the previous contents.
    pub fn read(&mut self) -> Result<(), SensorError<B, R>> {
        self.prepare_for_data_read()?;

        if let Err(err) = self.bus.request_from(self.address.as_u8(), NORMAL_LENGTH) {
            self.num_touches = 0;
            return Err(TrillError::Io(err));
        }

        let mut received = 0;
        while received < NORMAL_LENGTH {
            match self.bus.read() {
                Some(byte) => {
                    self.buffer[received] = byte;
                    received += 1;
                }
                None => break,
            }
        }

        if received < NORMAL_LENGTH {
            warn!(
                "trill {}: short scan read ({} of {} bytes)",
                self.address, received, NORMAL_LENGTH
            );
            self.num_touches = 0;
            return Err(TrillError::ShortRead {
                expected: NORMAL_LENGTH,
                received,
            });
        }

        self.num_touches = ScanFrame::new(&self.buffer).touch_count();
        Ok(())
    }

    /// Touches found by the last successful [`read`](Self::read).
    /// Always zero outside [`Mode::Normal`].
    pub fn number_of_touches(&self) -> usize {
        if self.mode != Some(Mode::Normal) {
            return 0;
        }
        self.num_touches
    }

    /// Location of touch `index`, or `None` outside [`Mode::Normal`] or when
    /// `index` is not a slot of the frame.
    ///
    /// The index is *not* checked against [`number_of_touches`](Self::number_of_touches):
    /// slots past the touch count decode stale or sentinel values (`0xFFFF`).
    /// Keep `index < number_of_touches()` on the caller side.
    pub fn touch_location(&self, index: usize) -> Option<u16> {
        self.scan_frame()?.location(index)
    }

    /// Size of touch `index`; same contract as [`touch_location`](Self::touch_location).
    pub fn touch_size(&self, index: usize) -> Option<u16> {
        self.scan_frame()?.size(index)
    }

    /// The valid touches of the last frame, in slot order.
    pub fn touches(&self) -> impl Iterator<Item = Touch> + '_ {
        let frame = ScanFrame::new(&self.buffer);
        (0..self.number_of_touches()).filter_map(move |slot| {
            Some(Touch {
                location: frame.location(slot)?,
                size: frame.size(slot)?,
            })
        })
    }

    fn scan_frame(&self) -> Option<ScanFrame<'_>> {
        (self.mode == Some(Mode::Normal)).then(|| ScanFrame::new(&self.buffer))
    }
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::super::mock::{MockBus, MockBusError};
    use super::*;
    use crate::common::{address::TrillAddr, layout::*};

    fn frame(locations: [u16; MAX_TOUCHES], sizes: [u16; MAX_TOUCHES]) -> Vec<u8> {
        locations
            .iter()
            .chain(sizes.iter())
            .flat_map(|v| v.to_be_bytes())
            .collect()
    }

    fn normal_sensor() -> TrillSensor<MockBus> {
        let mut sensor = TrillSensor::new(MockBus::new(), TrillAddr::BAR);
        sensor.set_mode(Mode::Normal).unwrap();
        sensor
    }

    #[test]
    fn test_read_two_touches() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([0x0010, 0x0020, 0xFFFF, 0xFFFF, 0xFFFF], [300, 150, 0, 0, 0]));

        sensor.read().unwrap();
        assert_eq!(sensor.number_of_touches(), 2);
        assert_eq!(sensor.touch_location(0), Some(16));
        assert_eq!(sensor.touch_location(1), Some(32));
        assert_eq!(sensor.touch_size(0), Some(300));
        assert_eq!(sensor.touch_size(1), Some(150));
        // Past the touch count the accessors still decode the slot.
        assert_eq!(sensor.touch_location(2), Some(0xFFFF));
        assert_eq!(sensor.touch_location(MAX_TOUCHES), None);
    }

    #[test]
    fn test_read_full_frame_reports_capacity() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([1, 2, 3, 4, 5], [9; MAX_TOUCHES]));
        sensor.read().unwrap();
        assert_eq!(sensor.number_of_touches(), MAX_TOUCHES);
        assert_eq!(sensor.touches().count(), MAX_TOUCHES);
    }

    #[test]
    fn test_touches_iterator() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([0x0400, 0x0A00, 0xFFFF, 0x0001, 0x0002], [10, 20, 0, 0, 0]));
        sensor.read().unwrap();
        let touches: Vec<Touch> = sensor.touches().collect();
        assert_eq!(
            touches,
            vec![
                Touch { location: 0x0400, size: 10 },
                Touch { location: 0x0A00, size: 20 },
            ]
        );
    }

    #[test]
    fn test_read_positions_pointer_once() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([0xFFFF; MAX_TOUCHES], [0; MAX_TOUCHES]));
        sensor.bus.stage(&frame([0xFFFF; MAX_TOUCHES], [0; MAX_TOUCHES]));
        sensor.read().unwrap();
        sensor.read().unwrap();

        assert_eq!(sensor.bus.writes, vec![vec![OFFSET_COMMAND, CMD_MODE, 0], vec![OFFSET_DATA]]);
        assert_eq!(sensor.bus.requests, vec![NORMAL_LENGTH, NORMAL_LENGTH]);
    }

    #[test]
    fn test_short_read_resets_count_and_keeps_stale_tail() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([0x0010, 0x0020, 0x0030, 0xFFFF, 0xFFFF], [1, 2, 3, 0, 0]));
        sensor.read().unwrap();
        assert_eq!(sensor.number_of_touches(), 3);

        sensor.bus.stage(&[0x00, 0x44, 0x00]);
        let result = sensor.read();
        assert!(matches!(
            result,
            Err(TrillError::ShortRead { expected: NORMAL_LENGTH, received: 3 })
        ));
        assert_eq!(sensor.number_of_touches(), 0);
        assert_eq!(sensor.touch_location(0), Some(0x0044));
        assert_eq!(sensor.touch_size(2), Some(3));
    }

    #[test]
    fn test_silent_device_is_short_read() {
        let mut sensor = normal_sensor();
        assert!(matches!(
            sensor.read(),
            Err(TrillError::ShortRead { received: 0, .. })
        ));
        assert_eq!(sensor.number_of_touches(), 0);
    }

    #[test]
    fn test_bus_error_on_read() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([5, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF], [1, 0, 0, 0, 0]));
        sensor.read().unwrap();
        sensor.bus.fail_requests = true;
        assert!(matches!(sensor.read(), Err(TrillError::Io(MockBusError))));
        assert_eq!(sensor.number_of_touches(), 0);
    }

    #[test]
    fn test_no_data_outside_normal_mode() {
        let mut sensor = normal_sensor();
        sensor.bus.stage(&frame([0x0010, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF], [7, 0, 0, 0, 0]));
        sensor.read().unwrap();
        assert_eq!(sensor.number_of_touches(), 1);

        sensor.set_mode(Mode::Differential).unwrap();
        assert_eq!(sensor.number_of_touches(), 0);
        assert_eq!(sensor.touch_location(0), None);
        assert_eq!(sensor.touch_size(0), None);
        assert_eq!(sensor.touches().count(), 0);

        sensor.set_mode(Mode::Normal).unwrap();
        assert_eq!(sensor.touch_location(0), Some(0x0010));
    }

    #[test]
    fn test_no_data_before_mode_is_set() {
        let mut sensor = TrillSensor::new(MockBus::new(), TrillAddr::BAR);
        sensor.bus.stage(&frame([0x0010, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF], [7, 0, 0, 0, 0]));
        sensor.read().unwrap();
        assert_eq!(sensor.number_of_touches(), 0);
        assert_eq!(sensor.touch_location(0), None);
    }
}
