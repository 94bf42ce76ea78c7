use std::io::{Read, Write};

use generic::command_to_proto::parse_protocol;
use generic::gantry_error::GantryError;
use generic::gantry_proto::GantryProto;
use serialport::{available_ports, SerialPort, SerialPortType};

pub fn find_serial_device(probe: &str) -> Option<String> {
    let probe_parts: Vec<&str> = probe.split(':').collect();
    if probe_parts.len() != 2 {
        return None;
    }
    let vid = u16::from_str_radix(probe_parts[0], 16).ok()?;
    let pid = u16::from_str_radix(probe_parts[1], 16).ok()?;

    if let Ok(ports) = available_ports() {
        for p in ports {
            if let SerialPortType::UsbPort(info) = p.port_type {
                if info.vid == vid && info.pid == pid {
                    return Some(p.port_name);
                }
            }
        }
    }

    None
}

/// Parses a console line into a request, sends it to the controller and
/// waits for the response.
pub fn send_command(
    command: &str,
    with_len: bool,
    port: &mut Box<dyn SerialPort>,
) -> Result<GantryProto, GantryError> {
    let msg = parse_protocol(command);
    if matches!(msg, GantryProto::Unknown) {
        return Err(GantryError::UnacceptableCommand);
    }
    let data =
        postcard::to_vec::<GantryProto, 64>(&msg).map_err(|_| GantryError::ConsoleIncorrectRequest)?;

    if with_len {
        let l = data.len() as u8;
        port.write(&[l]).map_err(|_| GantryError::ConsoleSendError)?;
    }
    println!("Line: {}, protocol: {:?}, data = {:?}", command, msg, data);
    port.write(&data).map_err(|_| GantryError::ConsoleSendError)?;

    let mut buf: Vec<u8> = vec![0u8; 64];
    let len = port.read(buf.as_mut_slice()).map_err(|_| GantryError::ConsoleRecvError)?;
    let resp_data = if with_len {
        assert_eq!((len - 1) as u8, buf[0]);
        &buf[1..len]
    } else {
        &buf[..len]
    };
    let resp =
        postcard::from_bytes::<GantryProto>(resp_data).map_err(|_| GantryError::ConsoleParseError)?;
    println!("Got response: ({len}) {:?}, msg: {:?}", &buf[..len], resp);
    port.flush().map_err(|_| GantryError::ConsoleFlushError)?;

    Ok(resp)
}
