use rover_host::dual_slider::DualSlider;
use rover_host::input::{InputEvent, SliderField};
use rover_host::link::DryRunLink;
use rover_host::protocol::{Command, MotorPair, Side};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};

fn start() -> (
    mpsc::Sender<InputEvent>,
    tokio::task::JoinHandle<DualSlider<DryRunLink>>,
    DryRunLink,
) {
    let link = DryRunLink::new();
    let sliders = DualSlider::new(link.clone(), Duration::from_millis(50));
    let (tx, rx) = mpsc::channel(16);
    (tx, tokio::spawn(sliders.run(rx)), link)
}

fn slide(side: Side, value: i32) -> InputEvent {
    InputEvent::Slide(SliderField::Motor(side), value)
}

#[tokio::test(start_paused = true)]
async fn burst_collapses_into_one_motor_pair() {
    let (tx, handle, link) = start();

    for (side, value) in [
        (Side::Left, 25),
        (Side::Right, 25),
        (Side::Left, 50),
        (Side::Right, -75),
    ] {
        tx.send(slide(side, value)).await.unwrap();
        sleep(Duration::from_millis(10)).await;
    }
    sleep(Duration::from_millis(100)).await;
    drop(tx);
    let sliders = handle.await.unwrap();

    assert_eq!(
        link.sent(),
        vec![Command::Motors(MotorPair { left: 50, right: -75 })]
    );
    assert_eq!(sliders.shown(), MotorPair { left: 50, right: -75 });
}

#[tokio::test(start_paused = true)]
async fn stop_before_settling_still_sends_the_settled_pair() {
    let (tx, handle, link) = start();

    tx.send(slide(Side::Left, 100)).await.unwrap();
    tx.send(InputEvent::Stop).await.unwrap();
    sleep(Duration::from_millis(200)).await;
    drop(tx);
    let sliders = handle.await.unwrap();

    assert_eq!(
        link.sent(),
        vec![
            Command::STOP,
            Command::Motors(MotorPair { left: 100, right: 0 }),
        ]
    );
    assert_eq!(sliders.shown(), MotorPair::default());
}

#[tokio::test(start_paused = true)]
async fn later_moves_keep_the_other_side() {
    let (tx, handle, link) = start();

    tx.send(slide(Side::Left, 40)).await.unwrap();
    sleep(Duration::from_millis(100)).await;
    tx.send(slide(Side::Right, -20)).await.unwrap();
    sleep(Duration::from_millis(100)).await;
    drop(tx);
    handle.await.unwrap();

    assert_eq!(
        link.sent(),
        vec![
            Command::Motors(MotorPair { left: 40, right: 0 }),
            Command::Motors(MotorPair { left: 40, right: -20 }),
        ]
    );
}
