use std::fmt::Display;
use std::io::{self, Write};

use circlebuf::RingBuffer;
use log::{debug, info};

use crate::config::Scenario;

const CAPACITY: usize = 4;

type DemoBuffer = RingBuffer<f32, CAPACITY>;

/// Replays a fixed sequence of buffer operations, writing the logical
/// contents after each step as one line.
pub struct Demo {
    scenario: Scenario,
}

impl Demo {
    pub fn new(scenario: Scenario) -> Self {
        Self { scenario }
    }

    pub fn run<W: Write>(&self, out: &mut W) -> io::Result<()> {
        info!("running {:?} scenario with capacity {CAPACITY}", self.scenario);

        match self.scenario {
            Scenario::Overwrite => self.overwrite(out),
            Scenario::Initializer => self.initializer(out),
        }
    }

    fn overwrite<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buf = DemoBuffer::new();
        for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
            buf.push_back(value);
        }
        display(out, &buf)?;

        let popped = buf.pop_front_or_default();
        debug!("pop_front -> {popped}");
        display(out, &buf)?;

        let popped = buf.pop_back_or_default();
        debug!("pop_back -> {popped}");
        display(out, &buf)?;

        buf.push_back(1.0);
        buf.push_back(2.0);
        display(out, &buf)?;

        buf.push_front(10.0);
        display(out, &buf)
    }

    fn initializer<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut buf = DemoBuffer::from([9.0, 6.0, 3.0]);
        display(out, &buf)?;
        debug!("full: {}", buf.is_full());

        buf.push_back(1.0);
        display(out, &buf)?;
        debug!("full: {}", buf.is_full());
        Ok(())
    }
}

fn display<W, T, const N: usize>(out: &mut W, buf: &RingBuffer<T, N>) -> io::Result<()>
where
    W: Write,
    T: Display,
{
    for value in buf {
        write!(out, "{value}, ")?;
    }
    writeln!(out)
}
