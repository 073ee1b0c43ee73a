use nmea_stream::{checksum::checksum, FixRecord, Parser, SentenceId, Statistics};

const GGA: &str = "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";
const ZDA: &str = "$GNZDA,195027.000,07,09,2025,,*4B\r\n";

/// Wrap a sentence body in `$`, checksum and line ending.
fn sentence(body: &str) -> String {
    format!("${body}*{:02X}\r\n", checksum(body.as_bytes()))
}

fn feed_bytes(parser: &mut Parser, bytes: &[u8]) -> Vec<SentenceId> {
    bytes.iter().filter_map(|b| parser.update(*b)).collect()
}

#[test]
fn gga_byte_by_byte() {
    let mut parser = Parser::new();
    let ids = feed_bytes(&mut parser, GGA.as_bytes());

    assert_eq!(ids, ["GPGGA"]);

    let fix = parser.fix();
    assert_eq!(fix.latitude_ascii(), "4807.038N");
    assert_eq!(fix.longitude_ascii(), "01131.000E");
    assert_eq!(fix.timestamp().hours, "12");
    assert_eq!(fix.timestamp().minutes, "35");
    assert_eq!(fix.timestamp().seconds, "19");
    assert_eq!(fix.fix_status(), 1);
    assert_eq!(fix.satellites_in_use(), 8);
    assert_eq!(fix.hdop(), "0.9");
    assert_eq!(fix.altitude(), "545.4");
    assert_eq!(fix.geoid_height(), "46.9");
    assert_eq!(
        fix.statistics(),
        Statistics {
            parsed_sentences: 1,
            crc_fails: 0,
            clean_sentences: 0,
        }
    );
}

#[test]
fn chunking_does_not_matter() {
    let stream = format!("noise{ZDA}{GGA}{}{ZDA}", sentence("GPGSV,1,1,00"));

    let mut whole = Parser::new();
    let expected_ids: Vec<_> = whole.feed(stream.as_bytes()).collect();
    assert_eq!(expected_ids, ["GNZDA", "GPGGA", "GNZDA"]);

    for chunk_len in 1..=stream.len() {
        let mut parser = Parser::new();
        let mut ids = Vec::new();
        for chunk in stream.as_bytes().chunks(chunk_len) {
            ids.extend(parser.feed(chunk));
        }

        assert_eq!(ids, expected_ids, "chunks of {chunk_len}");
        assert_eq!(parser.fix(), whole.fix(), "chunks of {chunk_len}");
    }
}

#[test]
fn uneven_chunks() {
    let stream = format!("{GGA}{ZDA}");
    let mut whole = Parser::new();
    whole.feed(stream.as_bytes()).for_each(drop);

    let mut parser = Parser::new();
    let mut rest = stream.as_bytes();
    for len in [1, 7, 2, 30, 3, 11].into_iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let (chunk, tail) = rest.split_at(len.min(rest.len()));
        parser.feed(chunk).for_each(drop);
        rest = tail;
    }

    assert_eq!(parser.fix(), whole.fix());
    assert_eq!(parser.fix().statistics().parsed_sentences, 2);
}

#[test]
fn single_corrupted_byte_is_a_crc_fail() {
    let star = GGA.find('*').unwrap();

    for i in 1..star {
        let mut parser = Parser::new();
        feed_bytes(&mut parser, ZDA.as_bytes());
        feed_bytes(&mut parser, GGA.as_bytes());
        let before = parser.fix().clone();

        let mut corrupted = GGA.as_bytes().to_vec();
        corrupted[i] = if corrupted[i] == b'0' { b'1' } else { b'0' };

        assert!(feed_bytes(&mut parser, &corrupted).is_empty(), "byte {i}");

        let after = parser.fix();
        assert_eq!(
            after.statistics(),
            Statistics {
                parsed_sentences: 2,
                crc_fails: 1,
                clean_sentences: 0,
            },
            "byte {i}"
        );
        assert_eq!(after.latitude(), before.latitude());
        assert_eq!(after.longitude(), before.longitude());
        assert_eq!(after.timestamp(), before.timestamp());
        assert_eq!(after.datestamp(), before.datestamp());
        assert_eq!(after.fix_status(), before.fix_status());
        assert_eq!(after.satellites_in_use(), before.satellites_in_use());
        assert_eq!(after.hdop(), before.hdop());
        assert_eq!(after.altitude(), before.altitude());
    }
}

#[test]
fn empty_timestamp() {
    let mut parser = Parser::new();
    let ids = feed_bytes(&mut parser, sentence("GPGGA,,,,,,0,00,,,M,,M,,").as_bytes());

    assert_eq!(ids, ["GPGGA"]);
    let ts = parser.fix().timestamp();
    assert_eq!(
        (ts.hours.as_str(), ts.minutes.as_str(), ts.seconds.as_str()),
        ("0", "0", "0.0")
    );
    assert!(!parser.fix().has_fix());
}

#[test]
fn overlong_sentence_is_dropped() {
    let mut parser = Parser::new();
    let long = sentence(&format!("GPGGA,{}", "9".repeat(100)));

    assert!(feed_bytes(&mut parser, long.as_bytes()).is_empty());
    assert_eq!(parser.fix().statistics(), Statistics::default());

    // the very next sentence goes through
    assert_eq!(feed_bytes(&mut parser, GGA.as_bytes()), ["GPGGA"]);
}

#[test]
fn checksum_completing_past_the_limit() {
    // 88 byte body, `*` is byte 89 and the checksum digits 90 and 91
    let mut body = String::from("GPZDA,201530.00,04,07,2002,00,00");
    body.push_str(&"0".repeat(88 - body.len()));

    let mut parser = Parser::new();
    assert_eq!(feed_bytes(&mut parser, sentence(&body).as_bytes()), ["GPZDA"]);
    assert_eq!(parser.fix().datestamp().year, "2002");
    assert_eq!(parser.fix().statistics().parsed_sentences, 1);

    let mut parser = Parser::new();
    let corrupted = format!("${body}*00\r\n");
    assert!(feed_bytes(&mut parser, corrupted.as_bytes()).is_empty());
    assert_eq!(parser.fix().statistics().crc_fails, 1);

    // one more byte and the sentence is given up on before its checksum
    body.push('0');
    let mut parser = Parser::new();
    assert!(feed_bytes(&mut parser, sentence(&body).as_bytes()).is_empty());
    assert_eq!(parser.fix().statistics(), Statistics::default());
}

#[test]
fn unknown_sentence_changes_nothing() {
    let mut parser = Parser::new();

    for body in [
        "GPTXT,01,01,02,ANTSTATUS=OK",
        "GNGSV,3,1,12,01,02,03,04",
        "PUBX,00,081350.00,4717.113210,N",
        "GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W",
        "GPVTG,054.7,T,034.4,M,005.5,N,010.2,K",
    ] {
        assert!(feed_bytes(&mut parser, sentence(body).as_bytes()).is_empty(), "{body}");
    }

    assert_eq!(parser.fix(), &FixRecord::new());
}

#[test]
fn failed_decode_keeps_previous_fix() {
    let mut parser = Parser::new();
    feed_bytes(&mut parser, GGA.as_bytes());
    let before = parser.fix().clone();

    for body in [
        // bad hemisphere
        "GPGGA,235959,5321.6802,X,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,",
        // satellites not a number
        "GPGGA,235959,5321.6802,N,00630.3372,W,1,x,1.03,61.7,M,55.2,M,,",
        // cut short
        "GPGGA,235959,5321.6802,N",
        "GPZDA,201530.00,04,07",
    ] {
        assert!(feed_bytes(&mut parser, sentence(body).as_bytes()).is_empty(), "{body}");
    }

    assert_eq!(parser.fix(), &before);
}

#[test]
fn bytes_after_the_checksum_are_ignored() {
    let mut parser = Parser::new();
    let mut stream = GGA.trim_end().to_owned();
    stream.push_str("47,*47\r\n");

    assert_eq!(feed_bytes(&mut parser, stream.as_bytes()), ["GPGGA"]);
    assert!(!parser.is_active());
    assert_eq!(parser.fix().statistics().parsed_sentences, 1);
}

#[test]
fn second_talkers() {
    let mut parser = Parser::new();
    let stream = format!(
        "{}{}",
        sentence("GLGGA,092750.000,5321.6802,N,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,"),
        sentence("GPZDA,201530.00,04,07,2002,00,00"),
    );

    assert_eq!(feed_bytes(&mut parser, stream.as_bytes()), ["GLGGA", "GPZDA"]);
    assert_eq!(parser.fix().latitude_ascii(), "5321.6802N");
    assert_eq!(parser.fix().longitude_ascii(), "00630.3372W");
    assert_eq!(parser.fix().timestamp().hours, "20");
    assert_eq!(parser.fix().datestamp().year, "2002");
}
