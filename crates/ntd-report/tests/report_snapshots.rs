//! Snapshot tests for the rendered reports.

use ntd_fault_queue::prelude::*;
use ntd_hal::Node;
use ntd_report::prelude::*;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn sample_queue() -> Result<FaultQueue, Box<dyn std::error::Error>> {
    let five = Node::digit(5).ok_or("digit")?;
    let three = Node::digit(3).ok_or("digit")?;
    let seven = Node::digit(7).ok_or("digit")?;

    let mut queue = FaultQueue::create()?;
    let _ = queue.append(&FaultRecord::open(0, Node::HighVoltage));
    let _ = queue.append(&FaultRecord::short(2, five, three));
    let _ = queue.append(&FaultRecord::short(3, Node::Blank, Node::DecimalPoint));
    let _ = queue.append(&FaultRecord::short(4, seven, Node::EncoderCode(12)));
    Ok(queue)
}

#[test]
fn test_operator_report() -> TestResult {
    let queue = sample_queue()?;
    let mut text = String::new();
    write_text(&mut text, &queue)?;
    insta::assert_snapshot!(text, @r"
    Error Type: OPEN
    Segment: 0
    Test Node: HIGH VOLTAGE CONNECTION
    Error Node: HIGH VOLTAGE CONNECTION

    --------------------------------------------------

    Error Type: SHORT
    Segment: 2
    Test Node: 5
    Error Node: 3

    --------------------------------------------------

    Error Type: SHORT
    Segment: 3
    Test Node: BLANK DIGIT
    Error Node: DECIMAL POINT

    --------------------------------------------------

    Error Type: SHORT
    Segment: 4
    Test Node: 7
    Error Node: UNMAPPED ENCODER CODE 12

    --------------------------------------------------

    Faults found: 4 (dropped: 0)
    ");
    Ok(())
}

#[test]
fn test_json_report() -> TestResult {
    let queue = sample_queue()?;
    let json = JsonReport::from_queue(&queue).to_string_pretty()?;
    insta::assert_snapshot!(json, @r#"
    {
      "faults": [
        {
          "kind": "OPEN",
          "segment": 0,
          "commanded": "high_voltage",
          "observed": "high_voltage"
        },
        {
          "kind": "SHORT",
          "segment": 2,
          "commanded": {
            "digit": 5
          },
          "observed": {
            "digit": 3
          }
        },
        {
          "kind": "SHORT",
          "segment": 3,
          "commanded": "blank",
          "observed": "decimal_point"
        },
        {
          "kind": "SHORT",
          "segment": 4,
          "commanded": {
            "digit": 7
          },
          "observed": {
            "encoder_code": 12
          }
        }
      ],
      "count": 4,
      "dropped": 0
    }
    "#);
    Ok(())
}

#[test]
fn test_text_and_stream_agree() -> TestResult {
    let queue = sample_queue()?;
    let mut bytes = Vec::new();
    write_text_to(&mut bytes, &queue)?;
    assert_eq!(String::from_utf8(bytes)?, render_text(&queue));
    Ok(())
}

#[test]
fn test_rendering_leaves_queue_untouched() -> TestResult {
    let queue = sample_queue()?;
    let before: Vec<FaultRecord> = queue.iter().copied().collect();
    let _ = render_text(&queue);
    let _ = JsonReport::from_queue(&queue).to_value()?;
    let after: Vec<FaultRecord> = queue.iter().copied().collect();
    assert_eq!(before, after);
    Ok(())
}
